use std::{fmt, io::Write};

use anyhow::Context as _;

use crate::{
    corpus::locator::{ANIMATION_DOCUMENTS, SourcePath, VECTOR_DOCUMENTS, list_files},
    foundation::{
        config::HarnessConfig,
        core::FRAME_SIZE,
        error::HarnessResult,
    },
    harness::{animation::FrameAnimationTestRunner, picture::StaticPictureTestRunner},
    render::session::RenderSession,
};

/// What a run does with the corpus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestMode {
    Generate,
    Test,
    Both,
}

impl TestMode {
    /// Both flags select `Both`, `generate` alone selects `Generate`, anything else `Test`.
    pub fn from_flags(generate: bool, test: bool) -> Self {
        match (generate, test) {
            (true, true) => Self::Both,
            (true, false) => Self::Generate,
            (false, _) => Self::Test,
        }
    }

    pub fn generates(self) -> bool {
        matches!(self, Self::Generate | Self::Both)
    }

    pub fn verifies(self) -> bool {
        matches!(self, Self::Test | Self::Both)
    }
}

/// A document kind with its own sources, baselines and runner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suite {
    Animation,
    Picture,
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Animation => "animation",
            Self::Picture => "picture",
        })
    }
}

/// Pass/fail counters for one verify pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, passed: bool) {
        self.total += 1;
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total TestCase : {}   Passed : {}   Failed : {}",
            self.total, self.passed, self.failed
        )
    }
}

/// Sequences generation and verification over each selected suite.
#[derive(Clone, Debug)]
pub struct TestModeController {
    config: HarnessConfig,
    mode: TestMode,
    suites: Vec<Suite>,
}

impl TestModeController {
    /// Runs every suite, animations first.
    pub fn new(config: HarnessConfig, mode: TestMode) -> Self {
        Self {
            config,
            mode,
            suites: vec![Suite::Animation, Suite::Picture],
        }
    }

    /// Restrict the run to `suites`. An empty selection keeps every suite.
    pub fn with_suites(mut self, suites: &[Suite]) -> Self {
        if !suites.is_empty() {
            let mut selected = suites.to_vec();
            selected.sort();
            selected.dedup();
            self.suites = selected;
        }
        self
    }

    pub fn mode(&self) -> TestMode {
        self.mode
    }

    /// Run the selected suites with engines from `session`, reporting to `out`.
    ///
    /// Returns one summary per verified suite.
    pub fn run(
        &self,
        session: &RenderSession,
        out: &mut dyn Write,
    ) -> HarnessResult<Vec<(Suite, RunSummary)>> {
        let mut summaries = Vec::new();
        for suite in &self.suites {
            let summary = match suite {
                Suite::Animation => {
                    let mut runner = FrameAnimationTestRunner::new(
                        Box::new(session.animation_engine()),
                        &self.config.animation_baseline_dir,
                        FRAME_SIZE,
                    )?;
                    let sources = list_files(&self.config.animation_dir, &ANIMATION_DOCUMENTS);
                    self.run_animation(&mut runner, &sources, out)?
                }
                Suite::Picture => {
                    let mut runner = StaticPictureTestRunner::new(
                        Box::new(session.picture_canvas(FRAME_SIZE)?),
                        &self.config.picture_baseline_dir,
                        FRAME_SIZE,
                    )?;
                    let sources = list_files(&self.config.picture_dir, &VECTOR_DOCUMENTS);
                    self.run_picture(&mut runner, &sources, out)?
                }
            };
            if let Some(summary) = summary {
                summaries.push((*suite, summary));
            }
        }
        Ok(summaries)
    }

    /// Animation suite over an explicit source list.
    pub fn run_animation(
        &self,
        runner: &mut FrameAnimationTestRunner,
        sources: &[SourcePath],
        out: &mut dyn Write,
    ) -> HarnessResult<Option<RunSummary>> {
        if self.mode.generates() {
            generate_all(Suite::Animation, sources, out, |src| {
                runner.generate(src);
            })?;
        }
        if !self.mode.verifies() {
            return Ok(None);
        }

        let summary = verify_all(Suite::Animation, sources, out, |src, out| {
            let outcome = runner.verify(src);
            if outcome.passed() {
                writeln!(out, "PASS")?;
            } else {
                writeln!(out, "FAIL")?;
                write!(out, "\t Frames : [ ")?;
                for frame in &outcome.failed {
                    write!(out, "{frame} ")?;
                }
                writeln!(out, "]")?;
            }
            Ok(outcome.passed())
        })?;
        Ok(Some(summary))
    }

    /// Picture suite over an explicit source list.
    pub fn run_picture(
        &self,
        runner: &mut StaticPictureTestRunner,
        sources: &[SourcePath],
        out: &mut dyn Write,
    ) -> HarnessResult<Option<RunSummary>> {
        if self.mode.generates() {
            generate_all(Suite::Picture, sources, out, |src| {
                runner.generate(src);
            })?;
        }
        if !self.mode.verifies() {
            return Ok(None);
        }

        let summary = verify_all(Suite::Picture, sources, out, |src, out| {
            let passed = runner.verify(src);
            writeln!(out, "{}", if passed { "PASS" } else { "FAIL" })?;
            Ok(passed)
        })?;
        Ok(Some(summary))
    }
}

fn generate_all(
    suite: Suite,
    sources: &[SourcePath],
    out: &mut dyn Write,
    mut generate: impl FnMut(&SourcePath),
) -> HarnessResult<()> {
    writeln!(out, "\n *** Generating baseline images for {suite} ***\n")
        .context("write report")?;
    for src in sources {
        writeln!(out, "{}", src.basename()).context("write report")?;
        generate(src);
    }
    writeln!(out, "\n *** Baseline generation for {suite} done ***\n").context("write report")?;
    Ok(())
}

fn verify_all(
    suite: Suite,
    sources: &[SourcePath],
    out: &mut dyn Write,
    mut verify: impl FnMut(&SourcePath, &mut dyn Write) -> std::io::Result<bool>,
) -> HarnessResult<RunSummary> {
    writeln!(
        out,
        "\n *** Test started for {suite}, total test cases: {} ***\n",
        sources.len()
    )
    .context("write report")?;

    let mut summary = RunSummary::default();
    for src in sources {
        write!(out, "TestCase : {} Status : ", src.basename()).context("write report")?;
        let passed = verify(src, &mut *out).context("write report")?;
        summary.record(passed);
    }

    writeln!(out, "\n {summary}\n").context("write report")?;
    tracing::info!(%suite, total = summary.total, failed = summary.failed, "verification done");
    Ok(summary)
}

#[cfg(test)]
#[path = "../../tests/unit/harness/controller.rs"]
mod tests;
