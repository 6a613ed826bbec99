use crate::airports::AirportTable;
use crate::error::{Error, Result};
use derive_builder::Builder;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

pub const DEFAULT_SCRIPT_PATH: &str = "airports-data.js";

lazy_static! {
    static ref IDENTIFIER_REGEX: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

/// How the generated script module names and exports the table.
#[derive(Clone, Debug, Builder, PartialEq, Eq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ScriptOptions {
    #[builder(setter(into), default = "\"airportsData\".to_string()")]
    pub var_name: String,
    #[builder(default = "true")]
    pub export: bool,
}

impl ScriptOptionsBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        match self.var_name {
            Some(ref name) if !IDENTIFIER_REGEX.is_match(name) => {
                Err(format!("\"{}\" is not a valid variable name", name))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Stdout,
    Script { path: PathBuf, options: ScriptOptions },
}

pub fn to_json(table: &AirportTable, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    table.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn to_script(table: &AirportTable, indent: usize, options: &ScriptOptions) -> Result<String> {
    let mut script = format!("const {} = {};\n\n", options.var_name, to_json(table, indent)?);
    if options.export {
        script += &format!("module.exports = {};\n\n", options.var_name);
    }
    Ok(script)
}

/// `airports-data.js` -> `airports-data.<host>.js`
pub fn qualify_with_host<P: AsRef<Path>>(path: P, host: &str) -> PathBuf {
    let path = path.as_ref();
    let stem = match path.file_stem() {
        Some(stem) => stem.to_string_lossy(),
        None => return path.join(host),
    };
    let ext = path.extension().map(|e| e.to_string_lossy());

    let name = std::iter::once(stem)
        .chain(std::iter::once(host.into()))
        .chain(ext)
        .join(".");
    path.with_file_name(name)
}

pub fn local_hostname() -> Result<String> {
    hostname::get()
        .map_err(|e| Error::Hostname { reason: e.to_string() })?
        .into_string()
        .map_err(|raw| Error::Hostname {
            reason: format!("{:?} is not valid UTF-8", raw),
        })
}

/// Write the table to `target`. Stdout output ends with a newline; script
/// output replaces any existing file.
pub fn emit<W: Write>(table: &AirportTable, target: &Target, indent: usize, stdout: &mut W) -> Result<()> {
    match target {
        Target::Stdout => {
            writeln!(stdout, "{}", to_json(table, indent)?)?;
            stdout.flush()?;
        }
        Target::Script { path, options } => {
            let script = to_script(table, indent, options)?;
            let write_err = |source| Error::WriteOutput {
                path: path.display().to_string(),
                source,
            };
            let mut file = File::create(path).map_err(write_err)?;
            file.write_all(script.as_bytes()).map_err(write_err)?;
        }
    }
    Ok(())
}
