//! `clean` subcommand: run a captured upstream payload through the same
//! parse and serialize path the relay uses.

use std::fs::File;
use std::io::{Read, Write, stdin, stdout};
use std::path::Path;

use anyhow::{Context, Result};
use propjson::{Options, Serialized, decode, invalid_body_report, safe_serialize_with};

use crate::config::CleanArgs;

/// The relay's answer for `bytes`: the cleaned document, or the
/// invalid-JSON report when parsing fails.
pub fn clean_payload(bytes: &[u8], options: &Options) -> Result<Serialized, (propjson::Error, Serialized)> {
    match decode::parse_with_options(bytes, options) {
        Ok(value) => Ok(safe_serialize_with(&value, options)),
        Err(e) => {
            let report = invalid_body_report(&e, bytes, None, options);
            let out = safe_serialize_with(&report, options);
            Err((e, out))
        }
    }
}

pub fn run_clean(args: &CleanArgs) -> Result<()> {
    let bytes = read_input(args.input.as_deref())?;
    let options = args.options();
    match clean_payload(&bytes, &options) {
        Ok(out) => emit(&out),
        Err((e, report)) => {
            emit(&report)?;
            Err(anyhow::Error::new(e).context("input is not valid JSON"))
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match path {
        Some(path) => {
            let mut f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            f.read_to_end(&mut buf)?;
        }
        None => {
            stdin().read_to_end(&mut buf)?;
        }
    }
    Ok(buf)
}

fn emit(out: &Serialized) -> Result<()> {
    let mut handle = stdout().lock();
    handle.write_all(&out.body)?;
    handle.write_all(b"\n")?;
    handle.flush()?;
    Ok(())
}
