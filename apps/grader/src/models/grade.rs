use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Maximum length of a single flag, counted in characters.
pub const FLAG_MAX_CHARS: usize = 280;

/// Overall resume grade. S is reserved for exceptional resumes, C is the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
}

/// Structured grade returned by the model and, after sanitization, to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    pub grade: Grade,
    pub red_flags: Vec<String>,
    pub yellow_flags: Vec<String>,
}

impl GradeResult {
    /// Checks the flag invariants: each flag is at most `FLAG_MAX_CHARS` long
    /// and contains no line breaks. Returns a description of the first violation.
    pub fn validate(&self) -> Result<(), String> {
        let lists = [("red_flags", &self.red_flags), ("yellow_flags", &self.yellow_flags)];
        for (list, flags) in lists {
            for (idx, flag) in flags.iter().enumerate() {
                let len = flag.chars().count();
                if len > FLAG_MAX_CHARS {
                    return Err(format!(
                        "{list}[{idx}] is {len} characters long (max {FLAG_MAX_CHARS})"
                    ));
                }
                if flag.contains(['\n', '\r']) {
                    return Err(format!("{list}[{idx}] contains a line break"));
                }
            }
        }
        Ok(())
    }

    /// JSON schema handed to the model as the fixed output shape.
    pub fn json_schema() -> Value {
        let flags = json!({
            "type": "array",
            "items": {
                "type": "string",
                "maxLength": FLAG_MAX_CHARS,
                "pattern": "^[^\\r\\n]*$"
            }
        });

        json!({
            "type": "object",
            "properties": {
                "grade": { "type": "string", "enum": ["S", "A", "B", "C"] },
                "red_flags": flags.clone(),
                "yellow_flags": flags
            },
            "required": ["grade", "red_flags", "yellow_flags"],
            "additionalProperties": false
        })
    }
}
