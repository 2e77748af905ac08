//! Post-processing of model output.
//!
//! The model sometimes flags Gmail addresses even though the rubric says not to.
//! Flags that mention Hotmail are left alone, since "avoid Hotmail, prefer Gmail"
//! is legitimate advice.

use tracing::debug;

use crate::models::grade::GradeResult;

/// Removes the first gmail-without-hotmail flag from each flag list.
///
/// At most one entry is removed per list per call; later matches stay in place.
pub fn sanitize(raw: GradeResult) -> GradeResult {
    let GradeResult {
        grade,
        mut red_flags,
        mut yellow_flags,
    } = raw;

    for flags in [&mut red_flags, &mut yellow_flags] {
        if let Some(removed) = remove_first_gmail_flag(flags) {
            debug!("Dropped gmail flag: {removed}");
        }
    }

    GradeResult {
        grade,
        red_flags,
        yellow_flags,
    }
}

fn is_gmail_flag(flag: &str) -> bool {
    let lower = flag.to_lowercase();
    lower.contains("gmail") && !lower.contains("hotmail")
}

fn remove_first_gmail_flag(flags: &mut Vec<String>) -> Option<String> {
    let idx = flags.iter().position(|f| is_gmail_flag(f))?;
    Some(flags.remove(idx))
}
