use mastermind::error::remediation_for;
use mastermind::MastermindError;

use crate::ui::primitives::icon::Icon;
use crate::ui::terminal::detect_capabilities;

/// Error text plus remediation hints for known failure signatures
pub fn format_error_with(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        err
    );
    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {}\n", cause));
    }

    let hints = err
        .downcast_ref::<MastermindError>()
        .and_then(MastermindError::remediation)
        .or_else(|| remediation_for(&format!("{:#}", err)));
    if let Some(hint) = hints {
        out.push_str("\nPossible solutions:\n");
        for solution in hint.solutions {
            out.push_str(&format!(
                "  {} {}\n",
                Icon::Arrow.colored(supports_color, supports_unicode),
                solution
            ));
        }
    }
    out
}

pub fn format_error(err: &anyhow::Error) -> String {
    let caps = detect_capabilities();
    format_error_with(err, caps.supports_color, caps.supports_unicode)
}

pub fn print_error(err: &anyhow::Error) {
    tracing::debug!(error = ?err, "command failed");
    eprint!("{}", format_error(err));
}
