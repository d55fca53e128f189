use cannimap::render::raster::{RasterError, RasterOptions, svg_to_jpeg, svg_to_png};
use cannimap::render::{self, SvgRenderOptions};
use cannimap::{ConflictId, Dashboard, DashboardConfig, Theme, sanitize_svg_id};
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Snapshot(cannimap::Error),
    Raster(RasterError),
    Json(serde_json::Error),
    UnknownConflict(ConflictId),
    SelectionRequired(&'static str),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Snapshot(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::UnknownConflict(id) => write!(f, "no conflict with id {id} in snapshot"),
            CliError::SelectionRequired(chart) => {
                write!(f, "--select <id> is required for the {chart} chart")
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<cannimap::Error> for CliError {
    fn from(value: cannimap::Error) -> Self {
        Self::Snapshot(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Render,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum ChartKind {
    #[default]
    Cluster,
    Trend,
    ShareBar,
}

impl FromStr for ChartKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cluster" => Ok(Self::Cluster),
            "trend" => Ok(Self::Trend),
            "sharebar" | "share-bar" => Ok(Self::ShareBar),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    chart: ChartKind,
    select: Option<ConflictId>,
    width: f64,
    height: f64,
    format: RenderFormat,
    scale: f32,
    background: Option<String>,
    config: Option<String>,
    diagram_id: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "cannimap-cli\n\
\n\
USAGE:\n\
  cannimap-cli [layout] [--chart cluster|trend|sharebar] [--select <id>] [--width <w>] [--height <h>] [--config <path>] [--pretty] [<path>|-]\n\
  cannimap-cli render [--chart cluster|trend|sharebar] [--select <id>] [--format svg|png|jpg] [--width <w>] [--height <h>] [--scale <n>] [--background <css-color>] [--config <path>] [--id <svg-id>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - <path> is a conflict snapshot JSON file; if omitted or '-', input is read from stdin.\n\
  - layout prints the chart layout JSON; render prints SVG to stdout by default.\n\
  - trend and sharebar charts need --select; cluster uses --select for highlighting only.\n\
  - --config points at a JSON file with config and themeVariables overrides.\n\
  - PNG/JPG output defaults to ./out.png / ./out.jpg when --out is omitted.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        width: 800.0,
        height: 450.0,
        scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--chart" => {
                let Some(kind) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.chart = kind
                    .parse::<ChartKind>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--select" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.select =
                    Some(id.parse::<ConflictId>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.scale.is_finite() && args.scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        Some(path) if path != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn selected_conflict<'a>(
    dash: &'a Dashboard,
    args: &Args,
    chart: &'static str,
) -> Result<&'a cannimap::Conflict, CliError> {
    let id = args.select.ok_or(CliError::SelectionRequired(chart))?;
    dash.conflict(id).ok_or(CliError::UnknownConflict(id))
}

fn chart_svg(dash: &Dashboard, args: &Args) -> Result<String, CliError> {
    let options = SvgRenderOptions {
        diagram_id: args.diagram_id.as_deref().map(sanitize_svg_id),
    };
    match args.chart {
        ChartKind::Cluster => {
            if let Some(id) = args.select {
                if dash.conflict(id).is_none() {
                    return Err(CliError::UnknownConflict(id));
                }
            }
            let layout = render::layout_cluster_chart(
                dash.conflicts(),
                args.select,
                args.width,
                args.height,
                dash.config(),
                dash.theme(),
            );
            Ok(render::render_cluster_svg(&layout, &options))
        }
        ChartKind::Trend => {
            let conflict = selected_conflict(dash, args, "trend")?;
            let layout = render::layout_trend_chart(
                conflict,
                args.width,
                args.height,
                dash.config(),
                dash.theme(),
            );
            Ok(render::render_trend_svg(&layout, &options))
        }
        ChartKind::ShareBar => {
            let conflict = selected_conflict(dash, args, "sharebar")?;
            let layout =
                render::layout_share_bar(conflict, args.width, args.height, dash.theme());
            Ok(render::render_share_bar_svg(&layout, &options))
        }
    }
}

fn layout_json(dash: &Dashboard, args: &Args) -> Result<String, CliError> {
    let value = match args.chart {
        ChartKind::Cluster => {
            if let Some(id) = args.select {
                if dash.conflict(id).is_none() {
                    return Err(CliError::UnknownConflict(id));
                }
            }
            serde_json::to_value(render::layout_cluster_chart(
                dash.conflicts(),
                args.select,
                args.width,
                args.height,
                dash.config(),
                dash.theme(),
            ))?
        }
        ChartKind::Trend => {
            let conflict = selected_conflict(dash, args, "trend")?;
            serde_json::to_value(render::layout_trend_chart(
                conflict,
                args.width,
                args.height,
                dash.config(),
                dash.theme(),
            ))?
        }
        ChartKind::ShareBar => {
            let conflict = selected_conflict(dash, args, "sharebar")?;
            serde_json::to_value(render::layout_share_bar(
                conflict,
                args.width,
                args.height,
                dash.theme(),
            ))?
        }
    };
    if args.pretty {
        Ok(serde_json::to_string_pretty(&value)?)
    } else {
        Ok(serde_json::to_string(&value)?)
    }
}

fn write_bytes(path: &str, bytes: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, bytes)?;
    eprintln!("wrote {path}");
    Ok(())
}

fn run() -> Result<(), CliError> {
    let argv: Vec<String> = std::env::args().collect();
    let args = parse_args(&argv)?;

    let (config, theme) = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let value: serde_json::Value = serde_json::from_str(&text)?;
            (DashboardConfig::from_value(&value), Theme::from_value(&value))
        }
        None => (DashboardConfig::default(), Theme::default()),
    };

    let mut dash = Dashboard::with_config(config, theme);
    let text = read_input(args.input.as_deref())?;
    dash.load_snapshot_json(&text)?;

    match args.command {
        Command::Layout => {
            println!("{}", layout_json(&dash, &args)?);
        }
        Command::Render => {
            let svg = chart_svg(&dash, &args)?;
            let raster = RasterOptions {
                scale: args.scale,
                background: args.background.clone(),
                jpeg_quality: 90,
            };
            match args.format {
                RenderFormat::Svg => match &args.out {
                    Some(path) => {
                        std::fs::write(path, svg.as_bytes())?;
                        eprintln!("wrote {path}");
                    }
                    None => println!("{svg}"),
                },
                RenderFormat::Png => {
                    let bytes = svg_to_png(&svg, &raster)?;
                    write_bytes(args.out.as_deref().unwrap_or("out.png"), &bytes)?;
                }
                RenderFormat::Jpeg => {
                    let bytes = svg_to_jpeg(&svg, &raster)?;
                    write_bytes(args.out.as_deref().unwrap_or("out.jpg"), &bytes)?;
                }
            }
        }
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
