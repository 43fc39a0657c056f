//! BrainRush demo entry point
//!
//! Plays one arithmetic session end to end with a scripted bot, printing the
//! event stream and the final result payload. Useful for eyeballing round
//! flow and scoring without a host frontend.

use std::env;

use brainrush_engine::engine::RoundPhase;
use brainrush_engine::persistence::{PersistError, ResultRecord, ResultSink};
use brainrush_engine::{Arithmetic, Challenge, Event, Input, Level, Session, Status};

/// Sink that prints the POST the host layer would make.
struct StdoutSink;

impl ResultSink for StdoutSink {
    fn submit(&mut self, path: &str, record: &ResultRecord) -> Result<(), PersistError> {
        let body = serde_json::to_string_pretty(record)
            .map_err(|e| PersistError::Transport(e.to_string()))?;
        println!("POST {path}\n{body}");
        Ok(())
    }
}

const STEP: f64 = 0.05;

/// Seconds the bot "thinks" before answering.
const THINK_TIME: f64 = 1.5;

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let level = args
        .next()
        .map(|s| s.parse().unwrap_or_else(|e| panic!("{e}")))
        .unwrap_or(Level::Easy);
    let seed = args
        .next()
        .map(|s| s.parse().unwrap_or_else(|_| panic!("seed must be an integer")))
        .unwrap_or(0xB12A);

    log::info!("arithmetic demo: level {level:?}, seed {seed}");

    let mut session =
        Session::new(Arithmetic::new(5), level, seed).with_sink(Box::new(StdoutSink));
    session.start();

    let mut think = 0.0;
    while session.status() == Status::Active {
        if session.phase() == RoundPhase::AcceptingInput {
            think += STEP;
            if think >= THINK_TIME {
                think = 0.0;
                let answer = match session.current_challenge() {
                    Some(Challenge::Arithmetic { expr, answer }) => {
                        println!("{expr} = {answer}");
                        Some(answer.to_string())
                    }
                    _ => None,
                };
                if let Some(answer) = answer {
                    session.handle(Input::AnswerText(answer));
                    session.handle(Input::Submit);
                }
            }
        }
        session.tick(STEP);
        for event in session.drain_events() {
            match event {
                Event::RoundStarted { index, .. } => println!("-- round {index} --"),
                Event::RoundResolved { outcome, score } => {
                    println!("{:?} ({:+}) -> score {score}", outcome.kind, outcome.points_delta);
                }
                Event::SessionFinished { record, .. } => {
                    println!("finished: {} points over {} rounds", record.score, record.rounds);
                }
                _ => {}
            }
        }
    }
}
