//! Automated verdict stage.
//!
//! Every submission is passed through a [`VerdictProvider`] before it is stored.
//! The bundled providers do not analyse content: [`RandomVerdictProvider`] flips a
//! coin and picks a canned explanation, [`PendingVerdictProvider`] defers the
//! decision entirely. A real classifier plugs in by implementing the trait.

use std::str::FromStr;

use rand::{seq::SliceRandom, Rng};

use crate::models::{AiVerdict, SubmitNewsRequest, Verdict};

pub const REAL_REASONS: [&str; 3] = [
    "Multiple credible sources corroborate this information.",
    "Content aligns with verified factual data.",
    "Source has established credibility and fact-checking history.",
];

pub const FAKE_REASONS: [&str; 3] = [
    "No credible sources found to support these claims.",
    "Contains misleading or out-of-context information.",
    "Source lacks verification and established credibility.",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub verdict: AiVerdict,
    pub reason: Option<String>,
}

pub trait VerdictProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn assess(&self, submission: &SubmitNewsRequest) -> Assessment;
}

/// Uniform real/fake verdict with one of three canned reasons
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomVerdictProvider;

impl VerdictProvider for RandomVerdictProvider {
    fn name(&self) -> &'static str {
        "random"
    }

    fn assess(&self, _submission: &SubmitNewsRequest) -> Assessment {
        let mut rng = rand::thread_rng();
        let verdict = if rng.gen_bool(0.5) { Verdict::Real } else { Verdict::Fake };
        let reasons = match verdict {
            Verdict::Real => &REAL_REASONS,
            Verdict::Fake => &FAKE_REASONS,
        };

        Assessment {
            verdict: verdict.into(),
            reason: reasons.choose(&mut rng).map(|r| r.to_string()),
        }
    }
}

/// Leaves every submission for a human to judge
#[derive(Debug, Default, Clone, Copy)]
pub struct PendingVerdictProvider;

impl VerdictProvider for PendingVerdictProvider {
    fn name(&self) -> &'static str {
        "pending"
    }

    fn assess(&self, _submission: &SubmitNewsRequest) -> Assessment {
        Assessment {
            verdict: AiVerdict::Pending,
            reason: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictProviderKind {
    Random,
    Pending,
}

impl VerdictProviderKind {
    pub fn build(self) -> Box<dyn VerdictProvider> {
        match self {
            VerdictProviderKind::Random => Box::new(RandomVerdictProvider),
            VerdictProviderKind::Pending => Box::new(PendingVerdictProvider),
        }
    }
}

impl FromStr for VerdictProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(VerdictProviderKind::Random),
            "pending" => Ok(VerdictProviderKind::Pending),
            other => Err(format!("unknown verdict provider '{}' (expected random or pending)", other)),
        }
    }
}
