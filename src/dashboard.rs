//! The composite figure: four charts on a 4×2 grid, an annotation row
//! and a signature row.
//!
//! ```text
//! +---------------------+---------------------+  height 1
//! | electricity access  | threatened birds    |
//! +---------------------+---------------------+  height 1
//! | top-10 CO2 emitters | renewable energy    |
//! +---------------------+---------------------+  height 0.1
//! | annotation text                           |
//! +-------------------------------------------+  height 0.05
//! |                                 signature |
//! +-------------------------------------------+
//! ```

use std::path::Path;
use tracing::{debug, info};
use crate::{
    Error, Result,
    data::{BirdSpecies, Datasets, ElectricityAccess, RenewableEnergy, Table},
    plt::{self, Axes, Figure, GridSpec},
    style::{AxisLabels, Color, Font, Palette, TickLabels},
    summary::{self, TopEmitters},
};

pub const FIGURE_SIZE: (f64, f64) = (26., 18.);
pub const WIDTH_RATIOS: [f64; 2] = [1., 1.];
pub const HEIGHT_RATIOS: [f64; 4] = [1., 1., 0.1, 0.05];

pub const SUPTITLE: &str =
    "Environmental Insights (1990-2020): Electricity, CO2, and Conservation";
const SUPTITLE_FONT: Font = Font::new().size(30.).bold().color(Color::FOREST_GREEN);
const SUPTITLE_Y: f64 = 0.96;

const TITLE_FONT: Font = Font::new().size(18.).bold().color(Color::DARK_BLUE);
const TITLE_PAD: f64 = 20.;
const LABEL_FONT: Font = Font::new().size(14.).bold();
const PIE_TEXT_FONT: Font = Font::new().size(12.).bold();

/// Width of each of the two bars of a region.
pub const BAR_WIDTH: f64 = 0.35;

/// Tick labels of the electricity chart: slanted, bold region names.
const ELECTRICITY_TICKS: TickLabels = TickLabels {
    x: AxisLabels { size: Some(12.), rotation: Some(45.), bold: true },
    y: AxisLabels { size: Some(12.), rotation: None, bold: false },
};
/// Tick labels of the emissions chart: upright, bold values.
const EMISSION_TICKS: TickLabels = TickLabels {
    x: AxisLabels { size: Some(12.), rotation: Some(0.), bold: true },
    y: AxisLabels { size: Some(12.), rotation: None, bold: false },
};
/// Tick labels of the renewable energy chart: upright years.
const RENEWABLE_TICKS: TickLabels = TickLabels {
    x: AxisLabels { size: Some(12.), rotation: Some(0.), bold: false },
    y: AxisLabels { size: None, rotation: None, bold: false },
};

pub const ANNOTATION: &str = "\
• East Asia & Pacific saw a decrease in electricity access from 99.64% to 92.32% (1990-2020), \
with 1,224 threatened bird species indicating additional environmental concerns. \
This slight decrease in electricity access, despite a high number of threatened species, suggests other environmental impact factors.\n\
• Qatar, Bahrain, and Kuwait have high CO2 emissions (31.73, 21.98, and 21.17 metric tons per capita respectively), \
suggesting significant sources of CO2 beyond electricity use. These high levels of emissions, not directly linked to electricity access, indicate significant sources of CO2 in these countries.\n\
• Renewable energy usage in Europe & Central Asia increased from 11.03% in 1990 to 23.53% in 2020. \
With 678 threatened bird species in the region, this increase in renewable energy usage indicates a positive trend in environmental conservation.\n\
• In East Asia & Pacific and Latin America & Caribbean, renewable energy consumption decreased (to 17.55% and 20.71% respectively) \
alongside high numbers of threatened bird species, highlighting the need for more investment in renewable energy.\n\
• Sub-Saharan Africa faces biodiversity challenges with lower CO2 emissions, indicating that environmental threats are likely due to factors other than emissions, such as habitat destruction.";

pub const SIGNATURE: &str = "Name:Sai Mohan Batta \n ID:22065814 ";

/// Color of the borders of every chart.
pub const FRAME_COLOR: Color = Color::BLACK;

/// Draw the grouped bar chart of electricity access, 1990 against 2020.
pub fn draw_electricity(ax: &mut Axes, rows: &[ElectricityAccess],
                        palette: &Palette) -> Result<()> {
    let index: Vec<f64> = (0 .. rows.len()).map(|i| i as f64).collect();
    let shifted: Vec<f64> = index.iter().map(|i| i + BAR_WIDTH).collect();
    let y1990: Vec<f64> = rows.iter().map(|r| r.pct_1990).collect();
    let y2020: Vec<f64> = rows.iter().map(|r| r.pct_2020).collect();
    let centers: Vec<f64> = index.iter().map(|i| i + BAR_WIDTH / 2.).collect();
    let regions: Vec<&str> = rows.iter().map(|r| r.region.as_str()).collect();

    ax.bar(&index, &y1990).width(BAR_WIDTH).label("1990")
        .color(palette.get(0)).plot()?;
    ax.bar(&shifted, &y2020).width(BAR_WIDTH).label("2020")
        .color(palette.get(1)).plot()?;
    ax.set_title("Access to Electricity Over Time (1990 vs 2020)",
                 &TITLE_FONT, TITLE_PAD)?
        .set_ylabel("% of Population with Access", &LABEL_FONT)?
        .set_xlabel("Regions", &LABEL_FONT)?
        .set_xticks(&centers, &regions, Some("right"))?
        .legend()?;
    Ok(())
}

/// Labels and sizes of the bird pie.  An empty table is an error:
/// there is nothing meaningful to draw.
pub fn pie_slices(rows: &[BirdSpecies]) -> Result<(Vec<&str>, Vec<f64>)> {
    if rows.is_empty() {
        return Err(Error::EmptyTable(BirdSpecies::FILE));
    }
    Ok(rows.iter().map(|r| (r.region.as_str(), r.threatened)).unzip())
}

/// Draw the pie of threatened bird species per region.
pub fn draw_birds(ax: &mut Axes, rows: &[BirdSpecies],
                  palette: &Palette) -> Result<()> {
    let (regions, counts) = pie_slices(rows)?;
    ax.pie(&counts)
        .labels(&regions)
        .autopct("%1.1f%%")
        .startangle(140.)
        .colors(&palette.take(counts.len()))
        .text_font(PIE_TEXT_FONT)
        .plot()?;
    ax.set_title("Threatened Bird Species by Region (2020)",
                 &TITLE_FONT, TITLE_PAD)?
        .axis("equal")?;
    Ok(())
}

/// A value written at the end of a horizontal bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// One label per emitter with its value to two decimals, at the end of
/// the bar in row `i`.  Blank emissions have no bar and no label.
pub fn emission_labels(top: &TopEmitters) -> Vec<BarLabel> {
    top.emissions().into_iter().enumerate()
        .filter(|(_, e)| !e.is_nan())
        .map(|(i, e)| BarLabel { x: e, y: i as f64, text: format!("{:.2}", e) })
        .collect()
}

/// Range of the emission axis, `None` to keep Matplotlib's own.
pub fn emission_xlim(top: &TopEmitters) -> Option<(f64, f64)> {
    top.axis_limit().map(|limit| (0., limit))
}

/// Draw the horizontal bars of the largest emitters, each labelled with
/// its value.
pub fn draw_emissions(ax: &mut Axes, top: &TopEmitters,
                      palette: &Palette) -> Result<()> {
    let pos: Vec<f64> = (0 .. top.len()).map(|i| i as f64).collect();
    let emissions = top.emissions();
    ax.barh(&pos, &emissions).color(palette.get(2)).plot()?;
    ax.set_yticks(&pos, &top.countries(), None)?;
    ax.set_title("Top-10 CO2 Emitting Countries (2020)",
                 &TITLE_FONT, TITLE_PAD)?
        .set_xlabel("CO2 Emission (Metric Ton Per Capita)", &LABEL_FONT)?
        .set_ylabel("Countries", &LABEL_FONT)?;
    for l in emission_labels(top) {
        ax.text(l.x, l.y, &l.text).va("center").draw()?;
    }
    if let Some((left, right)) = emission_xlim(top) {
        ax.set_xlim(left, right)?;
    }
    Ok(())
}

/// Draw one line per region across the year columns, legend outside
/// on the right.
pub fn draw_renewables(ax: &mut Axes, table: &RenewableEnergy,
                       palette: &Palette) -> Result<()> {
    for (i, (label, values)) in table.rows().enumerate() {
        ax.categories(&table.years, &values)
            .label(label)
            .color(palette.get(i))
            .plot()?;
    }
    ax.set_title("Renewable Energy Consumption Over Time (1990-2020)",
                 &TITLE_FONT, TITLE_PAD)?
        .set_ylabel("Renewable Energy Consumption (%)", &LABEL_FONT)?
        .set_xlabel("Years", &LABEL_FONT)?
        .legend_at((1., 1.), "upper left")?;
    Ok(())
}

/// The figure and its grid, ready to receive the charts.
pub struct Dashboard {
    fig: Figure,
    grid: GridSpec,
    palette: Palette,
}

impl Dashboard {
    /// Create the figure, its background, super-title and grid.
    pub fn new() -> Result<Dashboard> {
        let mut fig = plt::figure()?;
        fig.set_size_inches(FIGURE_SIZE.0, FIGURE_SIZE.1)?
            .set_facecolor(Color::BACKGROUND)?
            .suptitle(SUPTITLE, &SUPTITLE_FONT, SUPTITLE_Y)?;
        let grid = fig.gridspec(HEIGHT_RATIOS.len(), WIDTH_RATIOS.len(),
                                &WIDTH_RATIOS, &HEIGHT_RATIOS)?;
        Ok(Dashboard { fig, grid, palette: Palette::paired() })
    }

    fn cell(&self, row: usize, col: usize) -> Result<Axes> {
        self.fig.add_subplot(&self.grid, row .. row + 1, col .. col + 1)
    }

    /// A region spanning the whole width of the grid at `row`.
    fn banner(&self, row: usize) -> Result<Axes> {
        let mut ax = self.fig.add_subplot(&self.grid, row .. row + 1,
                                          0 .. self.grid.ncols())?;
        ax.axis("off")?;
        Ok(ax)
    }

    /// Draw every region from `data`.
    pub fn draw(&mut self, data: &Datasets) -> Result<()> {
        let mut ax1 = self.cell(0, 0)?;
        draw_electricity(&mut ax1, &data.electricity, &self.palette)?;
        debug!(regions = data.electricity.len(), "electricity chart");

        let mut ax2 = self.cell(0, 1)?;
        draw_birds(&mut ax2, &data.birds, &self.palette)?;
        debug!(regions = data.birds.len(), "birds chart");

        let mut ax3 = self.cell(1, 0)?;
        let top = summary::top_emitters(&data.co2, summary::TOP_N);
        draw_emissions(&mut ax3, &top, &self.palette)?;
        debug!(countries = top.len(), max = ?top.max_emission(),
               "emissions chart");

        let mut ax4 = self.cell(1, 1)?;
        draw_renewables(&mut ax4, &data.renewables, &self.palette)?;
        debug!(regions = data.renewables.labels.len(), "renewables chart");

        for ax in [&mut ax1, &mut ax2, &mut ax3, &mut ax4] {
            ax.format_plot(FRAME_COLOR)?;
        }
        self.fig.subplots_adjust(10., 10.)?;
        ax1.tick_labels(&ELECTRICITY_TICKS)?;
        ax3.tick_labels(&EMISSION_TICKS)?;
        ax4.tick_labels(&RENEWABLE_TICKS)?;

        self.banner(2)?.text(0., 0.5, ANNOTATION)
            .ha("left").va("center")
            .font(Font::new().size(20.).color(Color::BLACK))
            .wrap()
            .draw()?;
        self.banner(3)?.text(0.95, 0.5, SIGNATURE)
            .ha("right")
            .font(Font::new().size(18.).color(Color::BLACK))
            .draw()?;

        self.fig.tight_layout((0., 0.03, 1., 0.95))?;
        info!("figure composed");
        Ok(())
    }

    /// Display the figure on screen and wait for its window to close.
    pub fn show(self) -> Result<()> {
        plt::show()
    }

    /// Write the figure to `path`.  The figure is closed whether or not
    /// the write succeeds.
    pub fn save(self, path: impl AsRef<Path>, dpi: Option<f64>) -> Result<()> {
        let path = path.as_ref();
        let mut s = self.fig.save();
        if let Some(dpi) = dpi {
            s.dpi(dpi);
        }
        let saved = s.to_file(path);
        let closed = self.fig.close();
        saved?;
        info!(path = %path.display(), "figure saved");
        closed
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Co2Emission, RenewableEnergy};
    use ndarray::array;

    fn sample() -> Datasets {
        let region = |s: &str, a, b| ElectricityAccess {
            region: s.into(), pct_1990: a, pct_2020: b };
        let bird = |s: &str, n| BirdSpecies { region: s.into(), threatened: n };
        let co2 = |s: &str, e| Co2Emission { country: s.into(), emission: e };
        Datasets {
            electricity: vec![region("East Asia & Pacific", 99.64, 92.32),
                              region("Sub-Saharan Africa", 16.3, 48.4)],
            birds: vec![bird("East Asia & Pacific", 1224.),
                        bird("Europe & Central Asia", 678.)],
            co2: vec![co2("Kuwait", 21.17), co2("Qatar", 31.73),
                      co2("Bahrain", 21.98), co2("Chad", 0.13)],
            renewables: RenewableEnergy {
                labels: vec!["Europe & Central Asia".into(),
                             "East Asia & Pacific".into()],
                years: vec!["1990".into(), "2020".into()],
                values: array![[11.03, 23.53], [30.1, 17.55]],
            },
        }
    }

    #[test]
    fn empty_birds_is_an_error() {
        match pie_slices(&[]) {
            Err(Error::EmptyTable(file)) => assert_eq!(file, "Birds.csv"),
            other => panic!("expected EmptyTable, got {:?}", other),
        }
    }

    #[test]
    fn pie_slices_follow_rows() {
        let data = sample();
        let (labels, sizes) = pie_slices(&data.birds).unwrap();
        assert_eq!(labels, ["East Asia & Pacific", "Europe & Central Asia"]);
        assert_eq!(sizes, [1224., 678.]);
    }

    #[test]
    fn emission_labels_at_bar_ends() {
        let data = sample();
        let top = summary::top_emitters(&data.co2, summary::TOP_N);
        let labels = emission_labels(&top);
        let texts: Vec<_> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["31.73", "21.98", "21.17", "0.13"]);
        assert_eq!(labels[1], BarLabel { x: 21.98, y: 1., text: "21.98".into() });
        assert_eq!(emission_xlim(&top), Some((0., 31.73 * 1.15)));
    }

    #[test]
    fn emission_labels_round_and_skip_blanks() {
        let rows = vec![
            Co2Emission { country: "A".into(), emission: 2.005 },
            Co2Emission { country: "B".into(), emission: f64::NAN },
            Co2Emission { country: "C".into(), emission: 10. },
        ];
        let top = summary::top_emitters(&rows, summary::TOP_N);
        let labels = emission_labels(&top);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].text, "10.00");
        assert_eq!((labels[1].x, labels[1].y), (2.005, 1.));
        assert!(emission_labels(&summary::top_emitters(&[], 10)).is_empty());
        assert_eq!(emission_xlim(&summary::top_emitters(&[], 10)), None);
    }

    #[test]
    fn grid_ratios() {
        assert_eq!(HEIGHT_RATIOS.len(), 4);
        assert_eq!(WIDTH_RATIOS.len(), 2);
        assert!(ELECTRICITY_TICKS.x.rotation == Some(45.));
        assert!(EMISSION_TICKS.x.rotation == Some(0.));
    }

    #[test]
    fn full_dashboard_png() -> Result<(), Error> {
        let mut dash = Dashboard::new()?;
        dash.draw(&sample())?;
        dash.save("target/env_insights_dashboard.png", Some(50.))
    }

    #[test]
    fn failed_save_closes_figure() -> Result<(), Error> {
        let mut dash = Dashboard::new()?;
        dash.draw(&sample())?;
        let fig = dash.fig.clone();
        assert!(fig.is_open()?);
        let r = dash.save("target/no-such-dir/env_insights.png", None);
        assert!(matches!(r, Err(Error::FileNotFoundError)));
        assert!(!fig.is_open()?);
        Ok(())
    }

    #[test]
    fn empty_birds_stops_drawing() -> Result<(), Error> {
        let mut data = sample();
        data.birds.clear();
        let mut dash = Dashboard::new()?;
        assert!(matches!(dash.draw(&data), Err(Error::EmptyTable(_))));
        dash.fig.close()
    }
}
