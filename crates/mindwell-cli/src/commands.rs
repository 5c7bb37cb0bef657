use std::io::{BufRead, Write};
use std::time::Duration;

use mindwell_core::models::alert::{AlertSubscriber, RiskAlert};
use mindwell_core::models::score::ScoreResult;
use mindwell_instruments::all_instruments;
use mindwell_instruments::session::ScreeningSession;
use mindwell_interventions::catalog::{self, Category};
use mindwell_interventions::clock::InterventionClock;

const SCREENING_HELP: &str = "Enter a number from the scale, 'n' for next, 'b' for back, 'q' to quit.";

/// Logs risk alerts. Stands in for a counselor dashboard, which lives
/// outside this tool.
pub struct LogAlertSubscriber;

impl AlertSubscriber for LogAlertSubscriber {
    fn on_risk_alert(&self, alert: &RiskAlert) {
        tracing::warn!(
            session_id = %alert.session_id,
            instrument = %alert.instrument_id,
            tier = %alert.tier,
            raised_at = %alert.raised_at,
            "risk alert raised"
        );
    }
}

pub fn list_instruments<W: Write>(out: &mut W, json: bool) -> eyre::Result<()> {
    if json {
        let definitions: Vec<_> = all_instruments().iter().map(|i| i.definition()).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&definitions)?)?;
        return Ok(());
    }

    for instrument in all_instruments() {
        writeln!(
            out,
            "{:<6} {:<7} {} ({} questions, {})",
            instrument.id(),
            instrument.name(),
            instrument.title(),
            instrument.question_count(),
            instrument.time_estimate(),
        )?;
        writeln!(out, "       {}", instrument.description())?;
    }
    Ok(())
}

/// Drive a screening from line-oriented input.
///
/// A number records an answer and moves on. Returns `None` when the
/// respondent quits or input ends before the last question.
pub fn run_screening<R: BufRead, W: Write>(
    instrument_id: &str,
    input: R,
    out: &mut W,
    subscriber: &dyn AlertSubscriber,
) -> eyre::Result<Option<ScoreResult>> {
    let mut session = ScreeningSession::start(instrument_id)?;
    let instrument = session.instrument();
    writeln!(out, "{}", instrument.title())?;
    writeln!(out, "{}", instrument.description())?;
    writeln!(out, "{SCREENING_HELP}")?;
    print_question(&session, out)?;

    let mut lines = input.lines();
    while !session.is_complete() {
        let Some(line) = lines.next() else {
            tracing::info!(session_id = %session.id(), "input ended before completion");
            return Ok(None);
        };
        let line = line?;

        let step = match line.trim() {
            "q" => {
                writeln!(out, "Screening cancelled.")?;
                return Ok(None);
            }
            "b" => session.previous(),
            "n" | "" => session.next(),
            other => match other.parse::<u8>() {
                Ok(value) => session.answer(value).and_then(|()| session.next()),
                Err(_) => {
                    writeln!(out, "{SCREENING_HELP}")?;
                    continue;
                }
            },
        };
        if let Err(e) = step {
            writeln!(out, "{e}")?;
        }

        if !session.is_complete() {
            print_question(&session, out)?;
        }
    }

    let result = session.result()?.clone();
    print_result(&result, out)?;
    session.notify(subscriber);
    Ok(Some(result))
}

fn print_question<W: Write>(session: &ScreeningSession, out: &mut W) -> eyre::Result<()> {
    let instrument = session.instrument();
    writeln!(out)?;
    writeln!(
        out,
        "Question {} of {} ({:.0}%)",
        session.current_index() + 1,
        session.question_count(),
        session.progress() * 100.0
    )?;
    writeln!(out, "{}", instrument.preamble())?;
    writeln!(out, "{}", session.current_question())?;
    for option in instrument.response_scale() {
        let marker = if session.current_answer() == Some(option.value) {
            "*"
        } else {
            " "
        };
        writeln!(out, " {marker}[{}] {}", option.value, option.label)?;
    }
    Ok(())
}

fn print_result<W: Write>(result: &ScoreResult, out: &mut W) -> eyre::Result<()> {
    writeln!(out)?;
    writeln!(out, "Screening complete")?;
    writeln!(out, "Score: {} ({})", result.total, result.tier)?;
    writeln!(out, "{}", result.description)?;
    if result.counselor_prompt() {
        writeln!(out)?;
        writeln!(out, "Immediate support available")?;
        writeln!(
            out,
            "Your responses indicate you may benefit from speaking with a counselor."
        )?;
    }
    Ok(())
}

/// Run a breathing exercise, ticking the clock once per `period`.
/// Ctrl-C pauses the clock and stops the exercise.
pub async fn run_breathing<W: Write>(
    clock: &mut InterventionClock,
    out: &mut W,
    period: Duration,
) -> eyre::Result<()> {
    clock.start()?;
    writeln!(
        out,
        "Box breathing for {} seconds. Press Ctrl-C to stop.",
        clock.config().target_seconds
    )?;
    print_phase(clock, out)?;

    let mut interval = tokio::time::interval(period);
    // The first tick completes immediately.
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let outcome = clock.tick()?;
                if outcome.finished {
                    writeln!(
                        out,
                        "Great job! You've completed {} of breathing over {} cycles.",
                        clock.elapsed_display(),
                        clock.cycle_count()
                    )?;
                    break;
                }
                if outcome.cycle_completed {
                    tracing::debug!(cycles = clock.cycle_count(), "cycle completed");
                }
                if outcome.phase_changed {
                    print_phase(clock, out)?;
                }
            }
            result = &mut ctrl_c => {
                result?;
                clock.pause()?;
                writeln!(
                    out,
                    "Paused at {} ({:.0}% complete).",
                    clock.elapsed_display(),
                    clock.progress_fraction() * 100.0
                )?;
                break;
            }
        }
    }
    Ok(())
}

fn print_phase<W: Write>(clock: &InterventionClock, out: &mut W) -> eyre::Result<()> {
    writeln!(
        out,
        "[{}] {} ({}s)",
        clock.elapsed_display(),
        clock.current_phase().instruction,
        clock.seconds_remaining_in_phase()
    )?;
    Ok(())
}

pub fn list_interventions<W: Write>(out: &mut W, category: Option<Category>) -> eyre::Result<()> {
    let interventions: Vec<_> = match category {
        Some(category) => catalog::by_category(category).collect(),
        None => catalog::all_interventions().iter().collect(),
    };

    for intervention in interventions {
        writeln!(
            out,
            "{:<24} {} [{}]",
            intervention.id, intervention.name, intervention.duration
        )?;
        writeln!(out, "{:<24} {}", "", intervention.description)?;
        writeln!(out, "{:<24} Evidence: {}", "", intervention.evidence)?;
    }
    Ok(())
}

pub fn print_grounding<W: Write>(out: &mut W) -> eyre::Result<()> {
    writeln!(out, "5-4-3-2-1 Grounding")?;
    for step in catalog::grounding_steps() {
        writeln!(out, "{} - {}: {}", step.count, step.sense, step.instruction)?;
    }
    writeln!(
        out,
        "Take your time with each step. The goal is to bring your attention back to the present moment."
    )?;
    Ok(())
}
