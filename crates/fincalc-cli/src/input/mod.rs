pub mod file;
pub mod stdin;

use fincalc_core::FinCalcError;
use serde::de::DeserializeOwned;

/// Load a typed request from `--input <file>` or, failing that, piped stdin.
pub fn read_request<T: DeserializeOwned>(
    path: Option<&str>,
    command: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_json(path);
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(serde_json::from_value(data).map_err(FinCalcError::from)?),
        None => Err(format!("--input <file.json> or stdin required for {command}").into()),
    }
}
