//! td skill: print the bundled agent usage guide.

use crate::error::Result;
use crate::output::{emit_success, HumanOutput};

use super::task::Context;

const SKILL_MD: &str = include_str!("../../SKILL.md");

#[derive(serde::Serialize)]
struct SkillOutput {
    content: &'static str,
}

pub fn run(ctx: &Context) -> Result<()> {
    emit_success(
        ctx.output(),
        "skill",
        &SkillOutput { content: SKILL_MD },
        Some(&HumanOutput::new(SKILL_MD.trim_end())),
    )
}
