//! Thin bindings to the parts of [Matplotlib][] the dashboard draws
//! with.
//!
//! The interface stays close to Matplotlib's explicit one (a
//! [`Figure`] holding [`Axes`]) while keeping a Rust flavor: plots are
//! built with chained options and issued with a final `.plot()`.
//!
//! [Matplotlib]: https://matplotlib.org/

use std::{ops::Range, path::Path};
use lazy_static::lazy_static;
use pyo3::{
    prelude::*,
    intern,
    exceptions::{PyFileNotFoundError, PyPermissionError},
    types::PyDict,
};
use numpy::PyArray1;
use crate::{
    Error, Result,
    style::{self, AxisLabels, Color, Font, FrameStyle, TickLabels},
};

macro_rules! getattr {
    ($py: ident, $lib: expr, $f: literal) => {
        $lib.getattr($py, intern!($py, $f))
    };
}

macro_rules! meth {
    ($obj: expr, $m: ident, $py: ident -> $args: expr) => {
        Python::with_gil(|$py| {
            $obj.call_method1($py, intern!($py, stringify!($m)), $args)
        })
    };
    ($obj: expr, $m: ident, $args: expr) => {
        Python::with_gil(|py| {
            $obj.call_method1(py, intern!(py, stringify!($m)), $args)
        })
    };
}

/// Import and return a handle to the module `$m`.
macro_rules! pyimport { ($m: literal) => {
    Python::with_gil(|py|
        PyModule::import(py, intern!(py, $m)).map(|m| m.into()))
}}

lazy_static! {
    static ref PYPLOT: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.pyplot")
    };
}

/// Return a handle to the module `$m`.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod { ($m: ident) => {
    $m.as_ref().map_err(|_| Error::NoMatplotlib)
}}

/// Copy `x` into a fresh `numpy.ndarray`.  Matplotlib keeps references
/// to the arrays it is given until the figure is rendered, so the data
/// must be owned by Python.
fn array(py: Python<'_>, x: &[f64]) -> PyObject {
    PyArray1::from_slice_bound(py, x).into_any().unbind()
}

fn strings<S: AsRef<str>>(v: &[S]) -> Vec<String> {
    v.iter().map(|s| s.as_ref().to_owned()).collect()
}

fn set_font(kw: &PyDict, font: &Font) -> PyResult<()> {
    if let Some(size) = font.size {
        kw.set_item("fontsize", size)?;
    }
    kw.set_item("fontweight", font.weight.as_str())?;
    if let Some(c) = font.color {
        kw.set_item("color", c.hex())?;
    }
    Ok(())
}

/// `pyplot.setp(artists, **kwargs)`.
fn setp(pyplot: &Py<PyModule>, py: Python<'_>, artists: PyObject,
        kw: &PyDict) -> PyResult<()> {
    getattr!(py, pyplot, "setp")?.call(py, (artists,), Some(kw))?;
    Ok(())
}


/// The top level container for all the plot elements.
#[derive(Debug, Clone)]
pub struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

/// A grid of cells on which axes are placed.
#[derive(Debug, Clone)]
pub struct GridSpec {
    gs: PyObject, // instance of matplotlib.gridspec.GridSpec
    ncols: usize,
}

impl GridSpec {
    pub fn ncols(&self) -> usize { self.ncols }
}

/// Create a new figure managed by pyplot.
///
/// Return an error if Matplotlib is not present on the system.
pub fn figure() -> Result<Figure> {
    let pyplot = pymod!(PYPLOT)?;
    Python::with_gil(|py| -> Result<Figure> {
        let fig = getattr!(py, pyplot, "figure")?.call0(py)?;
        Ok(Figure { fig })
    })
}

/// Display all open figures.
pub fn show() -> Result<()> {
    let pyplot = pymod!(PYPLOT)?;
    Python::with_gil(|py| -> PyResult<()> {
        getattr!(py, pyplot, "show")?.call0(py)?;
        Ok(())
    })?;
    Ok(())
}

impl Figure {
    pub fn set_size_inches(&mut self, w: f64, h: f64) -> Result<&mut Self> {
        meth!(self.fig, set_size_inches, (w, h))?;
        Ok(self)
    }

    pub fn set_facecolor(&mut self, c: Color) -> Result<&mut Self> {
        meth!(self.fig, set_facecolor, (c.hex(),))?;
        Ok(self)
    }

    /// Add a centered title to the figure at height `y` (in figure
    /// coordinates).
    pub fn suptitle(&mut self, t: &str, font: &Font, y: f64)
                    -> Result<&mut Self> {
        Python::with_gil(|py| -> PyResult<()> {
            let kw = PyDict::new(py);
            set_font(kw, font)?;
            kw.set_item("y", y)?;
            self.fig.call_method(py, intern!(py, "suptitle"), (t,), Some(kw))?;
            Ok(())
        })?;
        Ok(self)
    }

    /// Return a `nrows`×`ncols` grid whose column widths and row
    /// heights are proportional to the given ratios.
    pub fn gridspec(&self, nrows: usize, ncols: usize,
                    width_ratios: &[f64], height_ratios: &[f64])
                    -> Result<GridSpec> {
        let gs = Python::with_gil(|py| -> PyResult<PyObject> {
            let kw = PyDict::new(py);
            kw.set_item("width_ratios", width_ratios.to_vec())?;
            kw.set_item("height_ratios", height_ratios.to_vec())?;
            self.fig.call_method(py, intern!(py, "add_gridspec"),
                                 (nrows, ncols), Some(kw))
        })?;
        Ok(GridSpec { gs, ncols })
    }

    /// Add axes covering the cells `rows`×`cols` of `gs`.
    pub fn add_subplot(&self, gs: &GridSpec,
                       rows: Range<usize>, cols: Range<usize>)
                       -> Result<Axes> {
        let ax = Python::with_gil(|py| -> PyResult<PyObject> {
            let spec = gs.gs.call_method1(
                py, intern!(py, "new_subplotspec"),
                ((rows.start, cols.start), rows.len(), cols.len()))?;
            self.fig.call_method1(py, intern!(py, "add_subplot"), (spec,))
        })?;
        Ok(Axes { ax, frame: FrameStyle::default() })
    }

    pub fn subplots_adjust(&mut self, wspace: f64, hspace: f64)
                           -> Result<&mut Self> {
        Python::with_gil(|py| -> PyResult<()> {
            let kw = PyDict::new(py);
            kw.set_item("wspace", wspace)?;
            kw.set_item("hspace", hspace)?;
            self.fig.call_method(py, intern!(py, "subplots_adjust"), (),
                                 Some(kw))?;
            Ok(())
        })?;
        Ok(self)
    }

    /// Adjust the padding between and around subplots so they fit in
    /// `rect` = (left, bottom, right, top), in figure coordinates.
    pub fn tight_layout(&mut self, rect: (f64, f64, f64, f64))
                        -> Result<&mut Self> {
        Python::with_gil(|py| -> PyResult<()> {
            let kw = PyDict::new(py);
            kw.set_item("rect", rect)?;
            self.fig.call_method(py, intern!(py, "tight_layout"), (),
                                 Some(kw))?;
            Ok(())
        })?;
        Ok(self)
    }

    /// Close the figure so pyplot forgets about it.
    pub fn close(self) -> Result<()> {
        let pyplot = pymod!(PYPLOT)?;
        Python::with_gil(|py| -> PyResult<()> {
            getattr!(py, pyplot, "close")?.call1(py, (self.fig,))?;
            Ok(())
        })?;
        Ok(())
    }

    pub fn save(&self) -> Savefig {
        Savefig { fig: self.fig.clone(), dpi: None }
    }

    /// Whether pyplot still manages this figure.
    #[cfg(test)]
    pub(crate) fn is_open(&self) -> Result<bool> {
        pymod!(PYPLOT)?;
        let open = Python::with_gil(|py| -> PyResult<bool> {
            let helpers = PyModule::import(py, "matplotlib._pylab_helpers")?;
            let managers = helpers.getattr("Gcf")?
                .call_method0("get_all_fig_managers")?;
            for m in managers.iter()? {
                let f = m?.getattr("canvas")?.getattr("figure")?;
                if f.is(self.fig.as_ref(py)) {
                    return Ok(true);
                }
            }
            Ok(false)
        })?;
        Ok(open)
    }
}

pub struct Savefig {
    fig: PyObject,
    dpi: Option<f64>,
}

impl Savefig {
    pub fn dpi(&mut self, dpi: f64) -> &mut Self {
        if dpi > 0. {
            self.dpi = Some(dpi);
        } else {
            self.dpi = None;
        }
        self
    }

    /// Write the figure to `path`; the format follows the extension.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        Python::with_gil(|py| -> Result<PyObject> {
            let kwargs = PyDict::new(py);
            if let Some(dpi) = self.dpi {
                kwargs.set_item("dpi", dpi)?
            }
            self.fig.call_method(
                py, intern!(py, "savefig"),
                (path.as_ref(),), Some(kwargs)
            ).map_err(|e| {
                    if e.is_instance_of::<PyFileNotFoundError>(py) {
                        Error::FileNotFoundError
                    } else if e.is_instance_of::<PyPermissionError>(py) {
                        Error::PermissionError
                    } else {
                        Error::Python(e)
                    }
                })
        })?;
        Ok(())
    }
}


/// One region of a figure.  The frame applied last is remembered so it
/// can be inspected.
#[derive(Debug, Clone)]
pub struct Axes {
    ax: PyObject,
    frame: FrameStyle,
}

impl Axes {
    /// Frame (borders and tick marks) last applied with
    /// [`Axes::apply_frame`].
    pub fn frame(&self) -> &FrameStyle {
        &self.frame
    }

    /// Give the region uniform borders of `color` and inward ticks.
    /// See [`style::format_plot`].
    pub fn format_plot(&mut self, color: Color) -> Result<&mut Self> {
        let mut frame = self.frame;
        style::format_plot(&mut frame, color);
        self.apply_frame(frame)
    }

    /// Push `frame` to the borders and tick marks of the region.
    pub fn apply_frame(&mut self, frame: FrameStyle) -> Result<&mut Self> {
        Python::with_gil(|py| -> PyResult<()> {
            let spines = getattr!(py, self.ax, "spines")?;
            for (side, spine) in frame.sides() {
                let s = spines.call_method1(py, intern!(py, "__getitem__"),
                                            (side.name(),))?;
                if let Some(c) = spine.color {
                    s.call_method1(py, intern!(py, "set_edgecolor"),
                                   (c.hex(),))?;
                }
                if let Some(w) = spine.width {
                    s.call_method1(py, intern!(py, "set_linewidth"), (w,))?;
                }
            }
            let kw = PyDict::new(py);
            if let Some(d) = frame.ticks.direction {
                kw.set_item("direction", d.as_str())?;
            }
            if let Some(l) = frame.ticks.length {
                kw.set_item("length", l)?;
            }
            if let Some(w) = frame.ticks.width {
                kw.set_item("width", w)?;
            }
            if !kw.is_empty() {
                self.ax.call_method(py, intern!(py, "tick_params"), (),
                                    Some(kw))?;
            }
            Ok(())
        })?;
        self.frame = frame;
        Ok(self)
    }

    /// Set the title; `pad` is the offset from the top of the axes, in
    /// points.
    pub fn set_title(&mut self, v: &str, font: &Font, pad: f64)
                     -> Result<&mut Self> {
        Python::with_gil(|py| -> PyResult<()> {
            let kw = PyDict::new(py);
            set_font(kw, font)?;
            kw.set_item("pad", pad)?;
            self.ax.call_method(py, intern!(py, "set_title"), (v,), Some(kw))?;
            Ok(())
        })?;
        Ok(self)
    }

    pub fn set_xlabel(&mut self, label: &str, font: &Font)
                      -> Result<&mut Self> {
        self.set_label(label, font, true)
    }

    pub fn set_ylabel(&mut self, label: &str, font: &Font)
                      -> Result<&mut Self> {
        self.set_label(label, font, false)
    }

    fn set_label(&mut self, label: &str, font: &Font, x: bool)
                 -> Result<&mut Self> {
        Python::with_gil(|py| -> PyResult<()> {
            let kw = PyDict::new(py);
            set_font(kw, font)?;
            let m = if x { intern!(py, "set_xlabel") }
                    else { intern!(py, "set_ylabel") };
            self.ax.call_method(py, m, (label,), Some(kw))?;
            Ok(())
        })?;
        Ok(self)
    }

    /// Place x ticks at `ticks` labelled by `labels`.  `ha` is the
    /// horizontal alignment of the labels ("left", "center", "right").
    pub fn set_xticks<S: AsRef<str>>(
        &mut self, ticks: &[f64], labels: &[S], ha: Option<&str>,
    ) -> Result<&mut Self> {
        self.set_ticks(ticks, labels, ha, true)
    }

    pub fn set_yticks<S: AsRef<str>>(
        &mut self, ticks: &[f64], labels: &[S], ha: Option<&str>,
    ) -> Result<&mut Self> {
        self.set_ticks(ticks, labels, ha, false)
    }

    fn set_ticks<S: AsRef<str>>(
        &mut self, ticks: &[f64], labels: &[S], ha: Option<&str>, x: bool,
    ) -> Result<&mut Self> {
        Python::with_gil(|py| -> PyResult<()> {
            let (set_ticks, set_labels) =
                if x { (intern!(py, "set_xticks"), intern!(py, "set_xticklabels")) }
                else { (intern!(py, "set_yticks"), intern!(py, "set_yticklabels")) };
            self.ax.call_method1(py, set_ticks, (array(py, ticks),))?;
            let kw = PyDict::new(py);
            if let Some(ha) = ha {
                kw.set_item("ha", ha)?;
            }
            self.ax.call_method(py, set_labels, (strings(labels),), Some(kw))?;
            Ok(())
        })?;
        Ok(self)
    }

    pub fn set_xlim(&mut self, left: f64, right: f64) -> Result<&mut Self> {
        meth!(self.ax, set_xlim, (left, right))?;
        Ok(self)
    }

    /// Convenience method to get or set axis properties, e.g. "off" or
    /// "equal".
    pub fn axis(&mut self, v: &str) -> Result<&mut Self> {
        meth!(self.ax, axis, (v,))?;
        Ok(self)
    }

    pub fn legend(&mut self) -> Result<&mut Self> {
        meth!(self.ax, legend, ())?;
        Ok(self)
    }

    /// Place the legend so that its corner `loc` (e.g. "upper left")
    /// sits at `anchor`, in axes coordinates.  Anchors outside the unit
    /// square put the legend outside the plot area.
    pub fn legend_at(&mut self, anchor: (f64, f64), loc: &str)
                     -> Result<&mut Self> {
        Python::with_gil(|py| -> PyResult<()> {
            let kw = PyDict::new(py);
            kw.set_item("bbox_to_anchor", anchor)?;
            kw.set_item("loc", loc)?;
            self.ax.call_method(py, intern!(py, "legend"), (), Some(kw))?;
            Ok(())
        })?;
        Ok(self)
    }

    /// Set size, rotation and weight of the tick labels of both axes.
    pub fn tick_labels(&mut self, t: &TickLabels) -> Result<&mut Self> {
        let pyplot = pymod!(PYPLOT)?;
        Python::with_gil(|py| -> PyResult<()> {
            self.axis_labels(py, pyplot, "x", &t.x)?;
            self.axis_labels(py, pyplot, "y", &t.y)
        })?;
        Ok(self)
    }

    fn axis_labels(&self, py: Python<'_>, pyplot: &Py<PyModule>,
                   axis: &str, l: &AxisLabels) -> PyResult<()> {
        let kw = PyDict::new(py);
        if let Some(s) = l.size {
            kw.set_item("labelsize", s)?;
        }
        if let Some(r) = l.rotation {
            kw.set_item("labelrotation", r)?;
        }
        if !kw.is_empty() {
            kw.set_item("axis", axis)?;
            self.ax.call_method(py, intern!(py, "tick_params"), (), Some(kw))?;
        }
        if l.bold {
            let m = if axis == "x" { intern!(py, "get_xticklabels") }
                    else { intern!(py, "get_yticklabels") };
            let labels = self.ax.call_method0(py, m)?;
            let kw = PyDict::new(py);
            kw.set_item("fontweight", "bold")?;
            setp(pyplot, py, labels, kw)?;
        }
        Ok(())
    }

    /// Vertical bars of the given `heights` centered at `x`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use env_insights::plt;
    /// let fig = plt::figure()?;
    /// let gs = fig.gridspec(1, 1, &[1.], &[1.])?;
    /// let mut ax = fig.add_subplot(&gs, 0..1, 0..1)?;
    /// ax.bar(&[0., 1., 2.], &[3., 1., 2.]).width(0.35).label("1990").plot()?;
    /// fig.save().to_file("target/bar.png")?;
    /// # Ok::<(), env_insights::Error>(())
    /// ```
    #[must_use]
    pub fn bar<'a>(&'a mut self, x: &'a [f64], heights: &'a [f64])
                   -> Bars<'a> {
        Bars { axes: self,
               options: PlotOptions::new(),
               horizontal: false,
               pos: x, len: heights,
               thickness: None }
    }

    /// Horizontal bars of the given `widths` centered at `y`.
    #[must_use]
    pub fn barh<'a>(&'a mut self, y: &'a [f64], widths: &'a [f64])
                    -> Bars<'a> {
        Bars { axes: self,
               options: PlotOptions::new(),
               horizontal: true,
               pos: y, len: widths,
               thickness: None }
    }

    /// A pie chart whose slices are proportional to `values`.
    #[must_use]
    pub fn pie<'a>(&'a mut self, values: &'a [f64]) -> Pie<'a> {
        Pie { axes: self,
              values,
              labels: vec![],
              autopct: None,
              startangle: 0.,
              colors: vec![],
              text_font: None }
    }

    /// A line through `y` against the categorical positions `x`.
    #[must_use]
    pub fn categories<'a, S>(&'a mut self, x: &'a [S], y: &'a [f64])
                             -> Line<'a, S>
    where S: AsRef<str> {
        Line { axes: self,
               options: PlotOptions::new(),
               x, y }
    }

    /// Put the text `s` at (`x`, `y`) in data coordinates.
    #[must_use]
    pub fn text<'a>(&'a mut self, x: f64, y: f64, s: &'a str) -> Text<'a> {
        Text { axes: self, x, y, s,
               ha: None, va: None,
               font: None, wrap: false }
    }
}

#[derive(Clone)]
struct PlotOptions<'a> {
    label: &'a str,
    color: Option<Color>,
    linewidth: Option<f64>,
}

impl<'a> PlotOptions<'a> {
    fn new() -> PlotOptions<'static> {
        PlotOptions { label: "", color: None, linewidth: None }
    }

    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<&'py PyDict> {
        let kwargs = PyDict::new(py);
        if !self.label.is_empty() {
            kwargs.set_item("label", self.label)?
        }
        if let Some(c) = self.color {
            kwargs.set_item("color", c.hex())?
        }
        if let Some(w) = self.linewidth {
            kwargs.set_item("linewidth", w)?
        }
        Ok(kwargs)
    }
}

/// Declare methods to set the options assuming `self.options` exists.
macro_rules! set_plotoptions { () => {
    #[must_use]
    pub fn label(mut self, label: &'a str) -> Self {
        self.options.label = label;
        self
    }

    #[must_use]
    pub fn color(mut self, c: Color) -> Self {
        self.options.color = Some(c);
        self
    }

    #[must_use]
    pub fn linewidth(mut self, w: f64) -> Self {
        self.options.linewidth = Some(w);
        self
    }
}}

/// Options of a bar chart, see [`Axes::bar`] and [`Axes::barh`].
pub struct Bars<'a> {
    axes: &'a Axes,
    options: PlotOptions<'a>,
    horizontal: bool,
    pos: &'a [f64], // Bar centers.
    len: &'a [f64], // Bar lengths (heights, or widths if horizontal).
    thickness: Option<f64>,
}

impl<'a> Bars<'a> {
    set_plotoptions!();

    /// Thickness of the bars: their width for vertical bars, their
    /// height for horizontal ones.  Matplotlib's default is 0.8.
    #[must_use]
    pub fn width(mut self, w: f64) -> Self {
        self.thickness = Some(w);
        self
    }

    /// Draw the bars.
    pub fn plot(self) -> Result<()> {
        Python::with_gil(|py| -> PyResult<()> {
            let kw = self.options.kwargs(py)?;
            let (m, thick) = if self.horizontal {
                (intern!(py, "barh"), "height")
            } else {
                (intern!(py, "bar"), "width")
            };
            if let Some(t) = self.thickness {
                kw.set_item(thick, t)?;
            }
            self.axes.ax.call_method(
                py, m, (array(py, self.pos), array(py, self.len)), Some(kw))?;
            Ok(())
        })?;
        Ok(())
    }
}

/// Options of a pie chart, see [`Axes::pie`].
pub struct Pie<'a> {
    axes: &'a Axes,
    values: &'a [f64],
    labels: Vec<String>,
    autopct: Option<&'a str>,
    startangle: f64,
    colors: Vec<Color>,
    text_font: Option<Font>,
}

impl<'a> Pie<'a> {
    #[must_use]
    pub fn labels<S: AsRef<str>>(mut self, labels: &[S]) -> Self {
        self.labels = strings(labels);
        self
    }

    /// Printf-style format of the percentage written in each slice.
    #[must_use]
    pub fn autopct(mut self, fmt: &'a str) -> Self {
        self.autopct = Some(fmt);
        self
    }

    /// Angle, in degrees, by which the start of the pie is rotated
    /// counterclockwise from the x-axis.
    #[must_use]
    pub fn startangle(mut self, deg: f64) -> Self {
        self.startangle = deg;
        self
    }

    #[must_use]
    pub fn colors(mut self, colors: &[Color]) -> Self {
        self.colors = colors.to_vec();
        self
    }

    /// Font of both the slice labels and the percentages.
    #[must_use]
    pub fn text_font(mut self, font: Font) -> Self {
        self.text_font = Some(font);
        self
    }

    /// Draw the pie.
    pub fn plot(self) -> Result<()> {
        let pyplot = pymod!(PYPLOT)?;
        Python::with_gil(|py| -> PyResult<()> {
            let kw = PyDict::new(py);
            if !self.labels.is_empty() {
                kw.set_item("labels", &self.labels)?;
            }
            if let Some(fmt) = self.autopct {
                kw.set_item("autopct", fmt)?;
            }
            kw.set_item("startangle", self.startangle)?;
            if !self.colors.is_empty() {
                let c: Vec<String> = self.colors.iter()
                    .map(|c| c.hex()).collect();
                kw.set_item("colors", c)?;
            }
            // Returns (wedges, texts) or (wedges, texts, autotexts).
            let res = self.axes.ax.call_method(
                py, intern!(py, "pie"), (array(py, self.values),), Some(kw))?;
            if let Some(font) = &self.text_font {
                let n = if self.autopct.is_some() { 3 } else { 2 };
                for i in 1 .. n {
                    let texts = res.call_method1(
                        py, intern!(py, "__getitem__"), (i,))?;
                    let kw = PyDict::new(py);
                    set_font(kw, font)?;
                    setp(pyplot, py, texts, kw)?;
                }
            }
            Ok(())
        })?;
        Ok(())
    }
}

/// Options of a line on a categorical x-axis, see [`Axes::categories`].
pub struct Line<'a, S> {
    axes: &'a Axes,
    options: PlotOptions<'a>,
    x: &'a [S],
    y: &'a [f64],
}

impl<'a, S> Line<'a, S>
where S: AsRef<str> {
    set_plotoptions!();

    /// Draw the line.
    pub fn plot(self) -> Result<()> {
        Python::with_gil(|py| -> PyResult<()> {
            let kw = self.options.kwargs(py)?;
            self.axes.ax.call_method(
                py, intern!(py, "plot"),
                (strings(self.x), array(py, self.y)), Some(kw))?;
            Ok(())
        })?;
        Ok(())
    }
}

/// Options of a text, see [`Axes::text`].
pub struct Text<'a> {
    axes: &'a Axes,
    x: f64,
    y: f64,
    s: &'a str,
    ha: Option<&'a str>,
    va: Option<&'a str>,
    font: Option<Font>,
    wrap: bool,
}

impl<'a> Text<'a> {
    /// Horizontal alignment: "left", "center" or "right".
    #[must_use]
    pub fn ha(mut self, ha: &'a str) -> Self {
        self.ha = Some(ha);
        self
    }

    /// Vertical alignment: "top", "center", "bottom" or "baseline".
    #[must_use]
    pub fn va(mut self, va: &'a str) -> Self {
        self.va = Some(va);
        self
    }

    #[must_use]
    pub fn font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Wrap the text at the figure's edge.
    #[must_use]
    pub fn wrap(mut self) -> Self {
        self.wrap = true;
        self
    }

    /// Put the text on the axes.
    pub fn draw(self) -> Result<()> {
        Python::with_gil(|py| -> PyResult<()> {
            let kw = PyDict::new(py);
            if let Some(ha) = self.ha {
                kw.set_item("ha", ha)?;
            }
            if let Some(va) = self.va {
                kw.set_item("va", va)?;
            }
            if let Some(font) = &self.font {
                set_font(kw, font)?;
            }
            if self.wrap {
                kw.set_item("wrap", true)?;
            }
            self.axes.ax.call_method(
                py, intern!(py, "text"), (self.x, self.y, self.s), Some(kw))?;
            Ok(())
        })?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Side, TickDirection};

    fn one_axes() -> Result<(Figure, Axes), Error> {
        let fig = figure()?;
        let gs = fig.gridspec(1, 1, &[1.], &[1.])?;
        let ax = fig.add_subplot(&gs, 0 .. 1, 0 .. 1)?;
        Ok((fig, ax))
    }

    #[test]
    fn grouped_bars_png() -> Result<(), Error> {
        let (fig, mut ax) = one_axes()?;
        let x = [0., 1., 2.];
        let x2: Vec<_> = x.iter().map(|x| x + 0.35).collect();
        ax.bar(&x, &[3., 1., 2.]).width(0.35).label("1990").plot()?;
        ax.bar(&x2, &[2., 2., 3.]).width(0.35).label("2020")
            .color(Color::BLACK).plot()?;
        ax.set_xticks(&[0.175, 1.175, 2.175], &["a", "b", "c"], Some("right"))?
            .legend()?;
        fig.save().to_file("target/plt_grouped_bars.png")?;
        fig.close()
    }

    #[test]
    fn pie_and_text_png() -> Result<(), Error> {
        let (fig, mut ax) = one_axes()?;
        ax.pie(&[1., 2., 3.])
            .labels(&["a", "b", "c"])
            .autopct("%1.1f%%")
            .startangle(140.)
            .text_font(Font::new().size(12.).bold())
            .plot()?;
        ax.axis("equal")?;
        ax.text(0., 0., "center").ha("center").va("center").draw()?;
        fig.save().to_file("target/plt_pie.png")?;
        fig.close()
    }

    #[test]
    fn lines_on_categories_svg() -> Result<(), Error> {
        let (mut fig, mut ax) = one_axes()?;
        let years = ["1990", "2000", "2010"];
        ax.categories(&years, &[1., 4., 2.]).label("one").plot()?;
        ax.categories(&years, &[2., 3., 5.]).label("two").linewidth(3.)
            .plot()?;
        ax.legend_at((1., 1.), "upper left")?;
        fig.set_size_inches(8., 6.)?.tight_layout((0., 0.03, 1., 0.95))?;
        fig.save().to_file("target/plt_lines.svg")?;
        fig.close()
    }

    #[test]
    fn format_plot_records_frame() -> Result<(), Error> {
        let (fig, mut ax) = one_axes()?;
        ax.barh(&[0., 1.], &[5., 3.]).plot()?;
        ax.format_plot(Color::BLACK)?;
        let once = *ax.frame();
        ax.format_plot(Color::BLACK)?;
        assert_eq!(*ax.frame(), once);
        assert_eq!(ax.frame().spine(Side::Left).color, Some(Color::BLACK));
        assert_eq!(ax.frame().ticks.direction, Some(TickDirection::In));
        fig.close()
    }
}
