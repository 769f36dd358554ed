use crate::domain::models::{ErrorBody, JsonErr, JsonOut, MergeError, MergeWarning};
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// Warnings go to stderr in text mode; in JSON mode they already ride
/// inside the report payload.
pub fn print_warnings(json: bool, warnings: &[MergeWarning]) {
    if json {
        return;
    }
    for w in warnings {
        eprintln!("warning[{}] {}: {}", w.code, w.zone, w.detail);
    }
}

/// Fatal path: text mode writes the diagnostic to stderr, `--json` keeps
/// stdout machine-readable with an error envelope.
pub fn print_failure(json: bool, err: &anyhow::Error) {
    let code = err
        .downcast_ref::<MergeError>()
        .map(MergeError::code)
        .unwrap_or("ERROR");
    if json {
        let body = JsonErr {
            ok: false,
            error: ErrorBody {
                code: code.to_string(),
                message: format!("{:#}", err),
            },
        };
        if let Ok(rendered) = serde_json::to_string_pretty(&body) {
            println!("{}", rendered);
        }
    } else {
        eprintln!("error: {:#}", err);
    }
}
