//! Command-line parsing and validation.
//!
//! Options follow getopt conventions (`-p sun`, `-psun`, `--object sun`,
//! `--object=sun`, `--` ends option parsing). Value errors are collected so
//! that every problem is reported in one run; `--help` and `--version` end
//! parsing as soon as they are seen.

use crate::data::{
    self, Body, LocationSource, Parameters, calendar_timezone, parse_local_datetime,
    parse_timezone_hours, resolve_horizon,
};
use crate::error::CliError;
use crate::output::validate_format;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

type CliResult<T> = Result<T, CliError>;

type ApplyFn = fn(&str, &mut ParseState) -> Result<(), String>;

enum OptKind {
    Value(ApplyFn),
    Flag(fn() -> CliError),
}

struct OptionSpec {
    short: char,
    long: &'static str,
    /// Placeholder shown in the help text for value options.
    value_name: &'static str,
    help: &'static str,
    kind: OptKind,
}

/// Raw option values that are only checked once all arguments are read.
#[derive(Debug, Default)]
struct ParseState {
    params: Parameters,
    object: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    query: Option<String>,
}

const OPTION_SPECS: &[OptionSpec] = &[
    OptionSpec {
        short: 'p',
        long: "object",
        value_name: "<name>",
        help: "calculate for given object/planet (sun, moon, mercury, venus, mars, jupiter, saturn, uranus, neptune, pluto)",
        kind: OptKind::Value(|value, state| {
            state.object = Some(value.to_string());
            Ok(())
        }),
    },
    OptionSpec {
        short: 'H',
        long: "horizon",
        value_name: "<twilight>",
        help: "calculate rise/set with given twilight (civil, nautic, astronomical) or horizon in degrees",
        kind: OptKind::Value(|value, state| {
            state.params.horizon = Some(resolve_horizon(value)?);
            Ok(())
        }),
    },
    OptionSpec {
        short: 't',
        long: "time",
        value_name: "<datetime>",
        help: "calculate for given local time, \"2011-12-25 13:45:00\" or \"2011-12-25\" (default: now)",
        kind: OptKind::Value(|value, state| {
            state.params.time = Some(parse_local_datetime(value, &calendar_timezone())?);
            Ok(())
        }),
    },
    OptionSpec {
        short: 'm',
        long: "moment",
        value_name: "<moment>",
        help: "calculate position at now, rise, set or transit (default: now)",
        kind: OptKind::Value(|value, state| {
            state.params.moment = value.parse()?;
            Ok(())
        }),
    },
    OptionSpec {
        short: 'f',
        long: "format",
        value_name: "<template>",
        help: "output format, strftime specifiers plus the object fields below (default: \"%Y-%m-%d %H:%M:%S\")",
        kind: OptKind::Value(|value, state| {
            validate_format(value)?;
            state.params.output.format = value.to_string();
            Ok(())
        }),
    },
    OptionSpec {
        short: 'a',
        long: "lat",
        value_name: "<degrees>",
        help: "geographical latitude of observer (-90° to 90°)",
        kind: OptKind::Value(|value, state| {
            state.latitude = Some(value.to_string());
            Ok(())
        }),
    },
    OptionSpec {
        short: 'o',
        long: "lon",
        value_name: "<degrees>",
        help: "geographical longitude of observer (-180° to 180°, east positive)",
        kind: OptKind::Value(|value, state| {
            state.longitude = Some(value.to_string());
            Ok(())
        }),
    },
    #[cfg(feature = "geonames")]
    OptionSpec {
        short: 'q',
        long: "query",
        value_name: "<place>",
        help: "look up geographical position of a place name via geonames.org",
        kind: OptKind::Value(|value, state| {
            state.query = Some(value.to_string());
            Ok(())
        }),
    },
    OptionSpec {
        short: 'z',
        long: "timezone",
        value_name: "<hours>",
        help: "print times with given offset from UTC in whole hours (default: local timezone)",
        kind: OptKind::Value(|value, state| {
            state.params.output.timezone = Some(parse_timezone_hours(value)?);
            Ok(())
        }),
    },
    OptionSpec {
        short: 'h',
        long: "help",
        value_name: "",
        help: "show this help",
        kind: OptKind::Flag(|| CliError::Exit(get_help_text())),
    },
    OptionSpec {
        short: 'v',
        long: "version",
        value_name: "",
        help: "show version and build information",
        kind: OptKind::Flag(|| CliError::Exit(get_version_text())),
    },
];

const FIELD_HELP: &[(&str, &str)] = &[
    ("§a", "azimuth, degrees from north, clockwise"),
    ("§h", "altitude above horizon"),
    ("§z", "zenith angle"),
    ("§r", "right ascension in degrees"),
    ("§R", "right ascension as HHhMMmSS.Ss"),
    ("§d", "declination"),
    ("§D", "distance (AU, moon in km)"),
    ("§j", "Julian day"),
    ("§l", "observer latitude"),
    ("§o", "observer longitude"),
    ("§n", "object name"),
    ("§§", "literal §"),
];

/// Object name implied by the program name, e.g. `sun` for a `sun` symlink.
pub fn invocation_alias(program: &str) -> Option<String> {
    Path::new(program)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

/// Parses `args` (including the program name) into a location source and
/// parameters. `alias` selects the object when `--object` is absent.
pub fn parse_cli(args: &[String], alias: Option<&str>) -> CliResult<(LocationSource, Parameters)> {
    let mut state = ParseState::default();
    let mut diagnostics = Vec::new();
    let mut args = args.iter().skip(1);

    while let Some(arg) = args.next() {
        if arg == "--" {
            diagnostics.extend(args.by_ref().map(|a| format!("unexpected argument '{}'", a)));
            break;
        }

        if let Some(long) = arg.strip_prefix("--") {
            let (name, inline) = long
                .split_once('=')
                .map(|(n, v)| (n, Some(v)))
                .unwrap_or((long, None));
            let Some(spec) = OPTION_SPECS.iter().find(|s| s.long == name) else {
                diagnostics.push(format!("unrecognized option '{}'", arg));
                continue;
            };
            match spec.kind {
                OptKind::Flag(exit) => {
                    if inline.is_some() {
                        diagnostics.push(format!("option '--{}' doesn't allow an argument", name));
                        continue;
                    }
                    return Err(exit());
                }
                OptKind::Value(apply) => {
                    match inline.or_else(|| args.next().map(String::as_str)) {
                        Some(value) => record(apply(value, &mut state), &mut diagnostics),
                        None => diagnostics.push(missing_argument(&format!("--{}", name))),
                    }
                }
            }
        } else if let Some(cluster) = arg.strip_prefix('-').filter(|c| !c.is_empty()) {
            for (index, short) in cluster.char_indices() {
                let Some(spec) = OPTION_SPECS.iter().find(|s| s.short == short) else {
                    diagnostics.push(format!("unrecognized option '-{}'", short));
                    continue;
                };
                match spec.kind {
                    OptKind::Flag(exit) => return Err(exit()),
                    OptKind::Value(apply) => {
                        let attached = &cluster[index + short.len_utf8()..];
                        let value = if attached.is_empty() {
                            args.next().map(String::as_str)
                        } else {
                            Some(attached)
                        };
                        match value {
                            Some(value) => record(apply(value, &mut state), &mut diagnostics),
                            None => diagnostics.push(missing_argument(&format!("-{}", short))),
                        }
                        break;
                    }
                }
            }
        } else {
            diagnostics.push(format!("unexpected argument '{}'", arg));
        }
    }

    let source = finish(&mut state, alias, &mut diagnostics);
    match source {
        Some(source) if diagnostics.is_empty() => {
            tracing::debug!(?source, params = ?state.params, "parsed command line");
            Ok((source, state.params))
        }
        _ => Err(CliError::Usage(diagnostics)),
    }
}

fn record(result: Result<(), String>, diagnostics: &mut Vec<String>) {
    if let Err(message) = result {
        diagnostics.push(message);
    }
}

fn missing_argument(option: &str) -> String {
    format!("option '{}' requires an argument", option)
}

/// Resolves the object and the position source once all options are read.
fn finish(
    state: &mut ParseState,
    alias: Option<&str>,
    diagnostics: &mut Vec<String>,
) -> Option<LocationSource> {
    state.params.body = match (&state.object, alias) {
        (Some(name), _) => record_parse(name.parse::<Body>(), diagnostics),
        (None, Some(alias)) => Body::from_alias(alias),
        (None, None) => None,
    };
    if state.object.is_none() && state.params.body.is_none() {
        diagnostics.push("invalid object".to_string());
    }

    let latitude = state.latitude.as_deref().map(|v| {
        parse_degrees("latitude", v).and_then(data::validate_latitude)
    });
    let longitude = state.longitude.as_deref().map(|v| {
        parse_degrees("longitude", v).and_then(data::validate_longitude)
    });

    match (latitude, longitude, state.query.take()) {
        (Some(lat), Some(lon), None) => {
            let lat = record_parse(lat, diagnostics);
            let lon = record_parse(lon, diagnostics);
            Some(LocationSource::Coordinates(lat?, lon?))
        }
        (None, None, Some(query)) => Some(LocationSource::Query(query)),
        (lat, lon, Some(_)) if lat.is_some() || lon.is_some() => {
            diagnostics.push("use either --lat and --lon or --query, not both".to_string());
            None
        }
        (Some(_), None, None) => {
            diagnostics.push("missing longitude".to_string());
            None
        }
        (None, Some(_), None) => {
            diagnostics.push("missing latitude".to_string());
            None
        }
        _ => {
            diagnostics.push("missing position".to_string());
            None
        }
    }
}

fn record_parse<T>(result: Result<T, String>, diagnostics: &mut Vec<String>) -> Option<T> {
    result.map_err(|message| diagnostics.push(message)).ok()
}

fn parse_degrees(label: &str, value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid {}: {}", label, value))
}

fn get_version_text() -> String {
    format!(
        "{} {}\n Build: {} ({})\n Built: {}\n Features: {}\n Engine: solar-positioning (SPA) for the sun, analytical ephemeris for moon and planets",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TARGET"),
        env!("BUILD_DATE"),
        env!("BUILD_FEATURES")
    )
}

fn option_label(spec: &OptionSpec) -> String {
    if spec.value_name.is_empty() {
        format!("-{}, --{}", spec.short, spec.long)
    } else {
        format!("-{}, --{} {}", spec.short, spec.long, spec.value_name)
    }
}

fn push_aligned(text: &mut String, rows: &[(String, &str)]) {
    let width = rows
        .iter()
        .map(|(label, _)| UnicodeWidthStr::width(label.as_str()))
        .max()
        .unwrap_or(0);
    for (label, help) in rows {
        let padding = width - UnicodeWidthStr::width(label.as_str());
        text.push_str(&format!("  {}{}  {}\n", label, " ".repeat(padding), help));
    }
}

pub fn get_help_text() -> String {
    let mut text = format!(
        "{} {}\nCalculates rise, set, transit and position of the sun, moon and planets.\n\nUsage:\n  {} [OPTIONS]\n\nOptions:\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_NAME"),
    );
    let options: Vec<(String, &str)> = OPTION_SPECS
        .iter()
        .map(|spec| (option_label(spec), spec.help))
        .collect();
    push_aligned(&mut text, &options);

    text.push_str("\nObject fields for --format:\n");
    let fields: Vec<(String, &str)> = FIELD_HELP
        .iter()
        .map(|(token, help)| (token.to_string(), *help))
        .collect();
    push_aligned(&mut text, &fields);

    if cfg!(feature = "geonames") {
        text.push_str("\nA combination of --lat, --lon or --query is required.\n");
    } else {
        text.push_str("\nA combination of --lat and --lon is required.\n");
    }
    text.push_str(&format!(
        "Without --object, the object is taken from the program name ({}).\n",
        Body::ALL.map(|body| body.as_str()).join(", ")
    ));
    text
}
