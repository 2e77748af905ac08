//! Few-shot training examples and the immutable asset bundle built from them at startup.

use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;
use tracing::info;

use crate::models::grade::{Grade, GradeResult};

/// File names of the bundled example resumes, in presentation order.
pub const TRAINING_FILES: [(Grade, &str); 4] = [
    (Grade::S, "s_resume.pdf"),
    (Grade::A, "a_resume.pdf"),
    (Grade::B, "b_resume.pdf"),
    (Grade::C, "c_resume.pdf"),
];

/// A sample resume paired with its known-correct grade.
#[derive(Debug, Clone)]
pub struct TrainingExample {
    pub document: Bytes,
    pub expected: GradeResult,
    /// `expected` as compact JSON, sent verbatim as the assistant turn.
    pub answer: String,
}

/// Read-only grading configuration, loaded once and shared across requests.
#[derive(Debug, Clone)]
pub struct GradingAssets {
    pub template_url: String,
    /// Always ordered S, A, B, C.
    pub examples: Vec<TrainingExample>,
}

impl GradingAssets {
    /// Reads the four example resumes from `dir`.
    pub fn load(dir: &Path, template_url: &str) -> Result<Self> {
        let mut documents = Vec::with_capacity(TRAINING_FILES.len());
        for (_, file) in TRAINING_FILES {
            let path = dir.join(file);
            let data = std::fs::read(&path)
                .with_context(|| format!("Failed to read training resume {}", path.display()))?;
            documents.push(Bytes::from(data));
        }

        let assets = Self::from_documents(documents, template_url)?;
        info!(
            "Loaded {} training resumes from {}",
            assets.examples.len(),
            dir.display()
        );
        Ok(assets)
    }

    /// Builds the bundle from already-loaded documents, ordered S, A, B, C.
    pub fn from_documents(documents: Vec<Bytes>, template_url: &str) -> Result<Self> {
        anyhow::ensure!(
            documents.len() == TRAINING_FILES.len(),
            "Expected {} training documents, got {}",
            TRAINING_FILES.len(),
            documents.len()
        );

        let examples = TRAINING_FILES
            .iter()
            .zip(documents)
            .map(|((grade, _), document)| {
                let expected = expected_result(*grade, template_url);
                let answer = serde_json::to_string(&expected)
                    .with_context(|| format!("Failed to serialize {grade:?} example"))?;
                Ok(TrainingExample {
                    document,
                    expected,
                    answer,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            template_url: template_url.to_string(),
            examples,
        })
    }
}

fn template_flag(template_url: &str) -> String {
    format!(
        "Format and design: The CV doesn't seem to follow the recommended style for the US \
         (like Latex or similar generator). Use the [silver.dev template]({template_url})."
    )
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Known-correct answer for each bundled example resume.
pub fn expected_result(grade: Grade, template_url: &str) -> GradeResult {
    match grade {
        Grade::S => GradeResult {
            grade,
            red_flags: vec![],
            yellow_flags: vec![],
        },
        Grade::A => GradeResult {
            grade,
            red_flags: strings(&[
                "Including birth date is unnecessary and can lead to bias.",
                "Including irrelevant details ('fluff') in the Mercado Libre section makes the CV less concise and direct.",
            ]),
            yellow_flags: {
                let mut flags = strings(&[
                    "Including technologies in the CV title or subtitle makes it look like filler content.",
                    "Using a Hotmail email address projects an outdated image.",
                    "Including full address in the CV; just city and country if relevant is enough.",
                ]);
                flags.push(template_flag(template_url));
                flags
            },
        },
        Grade::B => GradeResult {
            grade,
            red_flags: strings(&[
                "In the 'About' section, you could mention your achievements and how they align with the company's needs. Words like 'proactive', 'smart' and 'opportunities to grow' don't demonstrate anything - you need to show you're the candidate the company wants.",
                "The experiences listed don't specify concrete achievements, metrics or results obtained in projects. Include metrics that reflect impact, like 'improved loading time by X%' or 'increased backend efficiency by Y%'.",
                "Inconsistent English usage: In the 'EXPERIENCE' section there are minor English errors like 'Particpated' instead of 'Participated'. This can affect professional impression and show lack of attention to detail.",
            ]),
            yellow_flags: strings(&[
                "The skills section is extensive and not specific enough. Adjust it to the job description you're applying for, including the most relevant skills and omitting less important or redundant ones.",
                "'AWS' is mentioned twice in the skills section, which can be perceived as careless or disorganized.",
                "You mention your university studies are incomplete. While not a deal-breaker, I recommend omitting this.",
                "The 'MercadoCat' project could use more detail. Describe the technologies used, the impact it had, and other relevant details that demonstrate your skills and experience.",
            ]),
        },
        Grade::C => GradeResult {
            grade,
            red_flags: {
                let mut flags = vec![template_flag(template_url)];
                flags.extend(strings(&[
                    "Possible use of Word or other outdated processor: If the CV was made in Word or with an unprofessional format, it could be grounds for rejection in some cases.",
                    "Use of images: US companies consider including images in the CV inappropriate as it's not standard and can create negative perception.",
                    "Representing skills with percentages: Showing skills with percentages is discouraged as it doesn't clearly communicate actual competence level and can lead to misinterpretation. A descriptive format is preferred.",
                ]));
                flags
            },
            yellow_flags: vec![],
        },
    }
}
