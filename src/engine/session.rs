//! Session controller
//!
//! Owns one complete play-through of one game: round sequencing, the live
//! countdown, score and clock totals, and the final result record. The
//! controller is deterministic and event-driven: the host advances logical
//! time with [`Session::tick`], feeds player input through
//! [`Session::handle`], and drains output events after each call. Nothing in
//! here touches a wall clock.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::challenge::{Challenge, UserResponse};
use super::level::Level;
use super::round::{NextStep, OutcomeKind, RoundContext, RoundOutcome, RoundPhase};
use super::timer::{RoundTimer, TimerEvent};
use crate::games::{Game, MissPolicy, Progression, TimeBasis};
use crate::persistence::{self, ResultRecord, ResultSink};

/// Player/host input events.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A keystroke, tap or click extending the current response.
    Fragment(Fragment),
    /// Replacement of the typed answer text (arithmetic's input field).
    AnswerText(String),
    Backspace,
    /// Reset the current response.
    Clear,
    Submit,
    /// Player pressed the finish button.
    Finish,
    /// Player navigated away; finishes silently.
    NavigateAway,
}

/// One unit of response input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    Digit(u8),
    Tap { row: u8, col: u8 },
    /// Palette index of a tapped color button.
    Color(usize),
}

/// Output events, drained by the host after `tick`/`handle`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RoundStarted { index: u32, length: u32 },
    /// Full challenge content, for games that show it all at once.
    RoundPresented { challenge: Challenge },
    /// One symbol of a recall challenge became visible.
    SymbolRevealed { index: usize },
    /// Reveal finished (or content was immediate); countdown running.
    InputOpen { time_limit: f64 },
    /// Round countdown crossed a whole second.
    TimerTick { seconds_remaining: u32 },
    /// Session clock crossed a whole second.
    ClockTick { seconds: u64 },
    RoundResolved { outcome: RoundOutcome, score: i32 },
    SessionFinished { record: ResultRecord, silent: bool },
}

/// Lifecycle of a session instance. One instance plays one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Setup,
    Active,
    Finished,
}

pub struct Session<G: Game> {
    game: G,
    level: Level,
    status: Status,
    score: i32,
    total_elapsed: f64,
    /// Whole-second mirror of `total_elapsed`, as the session clock displays.
    clock_seconds: u64,
    /// 1-based count of rounds started.
    round_index: u32,
    /// Current sequence/path length (escalating family).
    length: u32,
    ctx: RoundContext,
    phase: RoundPhase,
    challenge: Option<Challenge>,
    response: UserResponse,
    timer: Option<RoundTimer>,
    /// Seconds spent in the current input phase.
    round_elapsed: f64,
    /// Accumulated input time of successful rounds (tapping memory).
    answer_time_total: f64,
    rng: Pcg32,
    events: Vec<Event>,
    sink: Option<Box<dyn ResultSink>>,
}

impl<G: Game> Session<G> {
    pub fn new(game: G, level: Level, seed: u64) -> Self {
        let length = match game.progression() {
            Progression::Escalating { start_len } => start_len,
            Progression::FixedRounds(_) => 0,
        };
        let response = game.empty_response();
        Self {
            game,
            level,
            status: Status::Setup,
            score: 0,
            total_elapsed: 0.0,
            clock_seconds: 0,
            round_index: 0,
            length,
            ctx: RoundContext { index: 0, length },
            phase: RoundPhase::Idle,
            challenge: None,
            response,
            timer: None,
            round_elapsed: 0.0,
            answer_time_total: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            sink: None,
        }
    }

    /// Attach the host's persistence collaborator.
    pub fn with_sink(mut self, sink: Box<dyn ResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    /// Current sequence/path length for the escalating games.
    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn current_challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    pub fn response(&self) -> &UserResponse {
        &self.response
    }

    /// Whole seconds on the session clock.
    pub fn clock_seconds(&self) -> u64 {
        self.clock_seconds
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Begin the session. Valid once, from `Setup`.
    pub fn start(&mut self) {
        if self.status != Status::Setup {
            log::warn!("start ignored: session already {:?}", self.status);
            return;
        }
        self.status = Status::Active;
        self.begin_round();
    }

    /// Advance logical time. Drives reveal cadences, the round countdown,
    /// feedback pauses and the session clock.
    pub fn tick(&mut self, dt: f64) {
        if self.status != Status::Active {
            return;
        }
        self.total_elapsed += dt;
        let whole = self.total_elapsed.floor() as u64;
        if whole > self.clock_seconds {
            self.clock_seconds = whole;
            self.events.push(Event::ClockTick { seconds: whole });
        }

        match self.phase {
            RoundPhase::Idle => {}
            RoundPhase::Preparing { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = RoundPhase::Preparing { remaining };
                } else if let Some(p) = self.game.presentation(self.level) {
                    self.phase = RoundPhase::Presenting {
                        until_next: p.reveal_interval,
                        revealed: 0,
                    };
                } else {
                    self.open_input();
                }
            }
            RoundPhase::Presenting { until_next, revealed } => {
                let Some(p) = self.game.presentation(self.level) else {
                    self.open_input();
                    return;
                };
                let total = self
                    .challenge
                    .as_ref()
                    .and_then(|c| c.reveal_len())
                    .unwrap_or(0);
                let mut until_next = until_next - dt;
                let mut revealed = revealed;
                while until_next <= 0.0 {
                    if revealed < total {
                        self.events.push(Event::SymbolRevealed { index: revealed });
                        revealed += 1;
                        until_next += p.reveal_interval;
                    } else {
                        // one extra beat after the last symbol, then input opens
                        self.open_input();
                        return;
                    }
                }
                self.phase = RoundPhase::Presenting { until_next, revealed };
            }
            RoundPhase::AcceptingInput => {
                self.round_elapsed += dt;
                let signal = self.timer.as_mut().and_then(|t| t.advance(dt));
                match signal {
                    Some(TimerEvent::Tick(seconds_remaining)) => {
                        self.events.push(Event::TimerTick { seconds_remaining });
                    }
                    Some(TimerEvent::Expired) => self.resolve(None),
                    None => {}
                }
            }
            RoundPhase::Resolved { remaining, next } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = RoundPhase::Resolved { remaining, next };
                } else {
                    self.advance(next);
                }
            }
        }
    }

    /// Apply one input event.
    pub fn handle(&mut self, input: Input) {
        if self.status != Status::Active {
            log::debug!("input ignored: session not active");
            return;
        }
        match input {
            Input::Finish => self.finish(false),
            Input::NavigateAway => self.finish(true),
            ref other if self.phase != RoundPhase::AcceptingInput => {
                log::debug!("{other:?} ignored outside the input phase");
            }
            Input::Fragment(fragment) => self.apply_fragment(fragment),
            Input::AnswerText(text) => match &mut self.response {
                UserResponse::Numeric(current) => *current = text,
                _ => log::warn!("answer text ignored for a non-numeric round"),
            },
            Input::Backspace => match &mut self.response {
                UserResponse::Digits(entered) => {
                    entered.pop();
                }
                UserResponse::Numeric(text) => {
                    text.pop();
                }
                // taps cannot be undone
                _ => {}
            },
            Input::Clear => self.response = self.game.empty_response(),
            Input::Submit => self.submit(),
        }
    }

    /// Finish the session. Silent finishes (navigate-away) still compute
    /// final tallies but may withhold the persistence call, per game.
    pub fn finish(&mut self, silent: bool) {
        if self.status != Status::Active {
            log::debug!("finish ignored: session not active");
            return;
        }
        // teardown cancels any live countdown before the record is built
        if let Some(timer) = &mut self.timer {
            timer.cancel();
        }
        self.timer = None;
        self.challenge = None;
        self.phase = RoundPhase::Idle;
        self.status = Status::Finished;

        let rounds = match self.game.progression() {
            Progression::FixedRounds(n) => n,
            Progression::Escalating { .. } => self.length.saturating_sub(1),
        };
        let time = match self.game.time_basis() {
            TimeBasis::SessionClock => self.clock_seconds as f64,
            TimeBasis::AnswerTime => self.answer_time_total,
        };
        let avg_time = self.game.report_avg_time().then(|| {
            if rounds > 0 {
                round2(time / rounds as f64)
            } else {
                0.0
            }
        });
        let record = ResultRecord {
            level: self.level.as_str().to_string(),
            score: self.score,
            time,
            rounds,
            avg_time,
        };
        self.events.push(Event::SessionFinished {
            record: record.clone(),
            silent,
        });

        if !silent || self.game.persist_on_silent() {
            match self.sink.as_mut() {
                Some(sink) => persistence::persist(sink.as_mut(), self.game.name(), &record),
                None => log::debug!("no result sink configured; record dropped"),
            }
        }
    }

    fn begin_round(&mut self) {
        self.round_index += 1;
        if let Progression::FixedRounds(_) = self.game.progression() {
            self.length = self.round_index;
        }
        self.ctx = RoundContext {
            index: self.round_index,
            length: self.length,
        };
        let challenge = self.game.generate(self.level, self.ctx, &mut self.rng);
        self.response = self.game.empty_response();
        self.events.push(Event::RoundStarted {
            index: self.round_index,
            length: self.length,
        });
        match self.game.presentation(self.level) {
            Some(p) => {
                self.phase = RoundPhase::Preparing {
                    remaining: p.ready_delay,
                };
            }
            None => {
                self.events.push(Event::RoundPresented {
                    challenge: challenge.clone(),
                });
            }
        }
        self.challenge = Some(challenge);
        if self.game.presentation(self.level).is_none() {
            self.open_input();
        }
    }

    fn open_input(&mut self) {
        // replace any timer left over from a previous round before arming
        if let Some(timer) = &mut self.timer {
            timer.cancel();
        }
        let time_limit = self.game.time_limit(self.level, self.ctx);
        self.timer = Some(RoundTimer::start(time_limit));
        self.round_elapsed = 0.0;
        self.phase = RoundPhase::AcceptingInput;
        self.events.push(Event::InputOpen { time_limit });
    }

    fn apply_fragment(&mut self, fragment: Fragment) {
        let accepted = match (&mut self.response, fragment) {
            (UserResponse::Digits(entered), Fragment::Digit(d)) if d <= 9 => {
                entered.push(d);
                true
            }
            (UserResponse::Taps(tapped), Fragment::Tap { row, col }) => {
                tapped.push((row, col));
                true
            }
            (UserResponse::Color(choice), Fragment::Color(index)) => {
                *choice = Some(index);
                true
            }
            (_, fragment) => {
                log::warn!("fragment {fragment:?} does not fit the current round; ignored");
                false
            }
        };
        if !accepted {
            return;
        }
        // a color tap is a complete response in itself
        if matches!(self.response, UserResponse::Color(Some(_))) {
            self.submit();
            return;
        }
        let auto = self
            .challenge
            .as_ref()
            .and_then(|c| c.auto_submit_len())
            .is_some_and(|n| self.response.len() == n);
        if auto {
            self.submit();
        }
    }

    fn submit(&mut self) {
        if self.phase != RoundPhase::AcceptingInput {
            return;
        }
        let Some(challenge) = self.challenge.as_ref() else {
            return;
        };
        // unparseable answer text is ignored; the round keeps accepting input
        if matches!(self.response, UserResponse::Numeric(_))
            && self.response.parsed_number().is_none()
        {
            log::warn!("non-numeric answer ignored");
            return;
        }
        let correct = challenge.matches(&self.response);
        self.resolve(Some(correct));
    }

    /// Produce the round's single outcome. `None` means the countdown expired.
    ///
    /// First event wins: the timer is cancelled before anything else, so the
    /// loser of the submit-vs-expiry race finds nothing left to act on.
    fn resolve(&mut self, correct: Option<bool>) {
        if let Some(timer) = &mut self.timer {
            timer.cancel();
        }
        self.timer = None;
        let elapsed = self.round_elapsed;

        let (kind, delta) = match correct {
            None => (
                OutcomeKind::Timeout,
                -self.game.timeout_penalty(self.level),
            ),
            Some(true) => {
                if self.game.time_basis() == TimeBasis::AnswerTime {
                    self.answer_time_total += elapsed;
                }
                (
                    OutcomeKind::Success,
                    self.game.score_success(self.level, self.ctx, elapsed),
                )
            }
            Some(false) => (OutcomeKind::Failure, -self.game.miss_penalty(self.level)),
        };

        self.score += delta;
        if self.game.floor_score_at_zero() && self.score < 0 {
            self.score = 0;
        }

        let outcome = RoundOutcome {
            kind,
            elapsed_seconds: elapsed,
            points_delta: delta,
        };
        self.events.push(Event::RoundResolved {
            outcome,
            score: self.score,
        });
        self.challenge = None;

        let next = match kind {
            OutcomeKind::Success => {
                if let Progression::Escalating { .. } = self.game.progression() {
                    self.length += 1;
                }
                self.step_after_completed_round()
            }
            OutcomeKind::Failure | OutcomeKind::Timeout => match self.game.miss_policy() {
                MissPolicy::EndSession => NextStep::Finish,
                MissPolicy::Continue => self.step_after_completed_round(),
            },
        };

        let delays = self.game.delays();
        let delay = match kind {
            OutcomeKind::Success => delays.success,
            OutcomeKind::Failure => delays.failure,
            OutcomeKind::Timeout => delays.timeout,
        };
        if delay > 0.0 {
            self.phase = RoundPhase::Resolved {
                remaining: delay,
                next,
            };
        } else {
            self.advance(next);
        }
    }

    fn step_after_completed_round(&self) -> NextStep {
        match self.game.progression() {
            Progression::FixedRounds(n) if self.round_index >= n => NextStep::Finish,
            _ => NextStep::NextRound,
        }
    }

    fn advance(&mut self, next: NextStep) {
        match next {
            NextStep::NextRound => self.begin_round(),
            NextStep::Finish => self.finish(false),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::games::{Arithmetic, ColorRush, SequenceRecall, TappingMemory, TappingVariant};
    use crate::persistence::PersistError;

    #[derive(Clone, Default)]
    struct RecordingSink(Rc<RefCell<Vec<(String, ResultRecord)>>>);

    impl ResultSink for RecordingSink {
        fn submit(&mut self, path: &str, record: &ResultRecord) -> Result<(), PersistError> {
            self.0.borrow_mut().push((path.to_string(), record.clone()));
            Ok(())
        }
    }

    fn accepting<G: Game>(s: &Session<G>) -> bool {
        s.phase() == RoundPhase::AcceptingInput
    }

    /// Tick in small steps until input opens (through ready delay + reveal).
    fn advance_until_accepting<G: Game>(s: &mut Session<G>, max_seconds: f64) {
        let mut elapsed = 0.0;
        while !accepting(s) && elapsed < max_seconds {
            s.tick(0.05);
            elapsed += 0.05;
        }
        assert!(accepting(s), "input never opened within {max_seconds}s");
    }

    fn arithmetic_answer<G: Game>(s: &Session<G>) -> f64 {
        match s.current_challenge() {
            Some(Challenge::Arithmetic { answer, .. }) => *answer,
            other => panic!("expected arithmetic challenge, got {other:?}"),
        }
    }

    fn sequence_digits<G: Game>(s: &Session<G>) -> Vec<u8> {
        match s.current_challenge() {
            Some(Challenge::DigitSequence { digits }) => digits.clone(),
            other => panic!("expected digit sequence, got {other:?}"),
        }
    }

    fn resolved_outcomes(events: &[Event]) -> Vec<RoundOutcome> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::RoundResolved { outcome, .. } => Some(outcome.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_arithmetic_runs_every_configured_round() {
        let mut s = Session::new(Arithmetic::new(3), Level::Easy, 42);
        s.start();
        for _ in 0..3 {
            assert!(accepting(&s));
            let answer = arithmetic_answer(&s);
            s.handle(Input::AnswerText(answer.to_string()));
            s.handle(Input::Submit);
            s.tick(0.8); // feedback pause, then next round or finish
        }
        assert_eq!(s.status(), Status::Finished);

        let events = s.drain_events();
        let outcomes = resolved_outcomes(&events);
        assert_eq!(outcomes.len(), 3);
        let total: i32 = outcomes.iter().map(|o| o.points_delta).sum();
        assert_eq!(total, s.score());
    }

    #[test]
    fn test_arithmetic_continues_after_misses_and_score_can_go_negative() {
        let mut s = Session::new(Arithmetic::new(2), Level::Easy, 7);
        s.start();
        for _ in 0..2 {
            assert!(accepting(&s));
            let wrong = arithmetic_answer(&s) + 100.0;
            s.handle(Input::AnswerText(wrong.to_string()));
            s.handle(Input::Submit);
            s.tick(0.8);
        }
        assert_eq!(s.status(), Status::Finished);
        // two misses at easy: -3 each
        assert_eq!(s.score(), -6);
    }

    #[test]
    fn test_submit_and_expiry_cannot_both_resolve_a_round() {
        let mut s = Session::new(Arithmetic::new(2), Level::Easy, 1);
        s.start();
        let answer = arithmetic_answer(&s);
        s.tick(2.0);
        s.handle(Input::AnswerText(answer.to_string()));
        s.handle(Input::Submit);
        // push far past the first round's 10 s limit in one go; the cancelled
        // countdown must not produce a second outcome for round 1
        s.tick(20.0);
        let outcomes = resolved_outcomes(&s.drain_events());
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].kind, OutcomeKind::Success);
        // round 2 is live and untouched
        assert!(accepting(&s));
        assert_eq!(s.round_index(), 2);
    }

    #[test]
    fn test_round_timeout_produces_timeout_outcome() {
        let mut s = Session::new(Arithmetic::new(2), Level::Easy, 5);
        s.start();
        for _ in 0..101 {
            s.tick(0.1); // 10.1 s > 10 s limit
        }
        let events = s.drain_events();
        let outcomes = resolved_outcomes(&events);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].kind, OutcomeKind::Timeout);
        assert_eq!(outcomes[0].points_delta, -3);
        // fixed-round family keeps going after a timeout
        assert_eq!(s.status(), Status::Active);
    }

    #[test]
    fn test_garbage_answer_is_ignored_in_place() {
        let mut s = Session::new(Arithmetic::new(1), Level::Easy, 3);
        s.start();
        s.handle(Input::AnswerText("not a number".into()));
        s.handle(Input::Submit);
        assert!(accepting(&s));
        assert!(resolved_outcomes(&s.drain_events()).is_empty());
    }

    #[test]
    fn test_outcome_precedes_next_challenge() {
        let mut s = Session::new(Arithmetic::new(2), Level::Easy, 11);
        s.start();
        let answer = arithmetic_answer(&s);
        s.handle(Input::AnswerText(answer.to_string()));
        s.handle(Input::Submit);
        s.tick(0.8);
        let events = s.drain_events();
        let resolved_at = events
            .iter()
            .position(|e| matches!(e, Event::RoundResolved { .. }))
            .unwrap();
        let second_start = events
            .iter()
            .rposition(|e| matches!(e, Event::RoundStarted { .. }))
            .unwrap();
        assert!(resolved_at < second_start);
    }

    #[test]
    fn test_color_rush_correct_tap_scores_within_bounds() {
        let mut s = Session::new(ColorRush, Level::Easy, 21);
        s.start();
        let display = match s.current_challenge() {
            Some(Challenge::ColorWord { display, .. }) => *display,
            other => panic!("expected color word, got {other:?}"),
        };
        s.tick(1.2);
        s.handle(Input::Fragment(Fragment::Color(display)));
        let outcomes = resolved_outcomes(&s.drain_events());
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].kind, OutcomeKind::Success);
        // elapsed 1.2 of 5 s: round(10 + 0.76 * 10 * 0.5) = 14
        assert_eq!(outcomes[0].points_delta, 14);
        assert!((10..=15).contains(&outcomes[0].points_delta));
    }

    #[test]
    fn test_color_rush_wrong_tap_ends_session_with_floored_score() {
        let sink = RecordingSink::default();
        let mut s = Session::new(ColorRush, Level::Easy, 22).with_sink(Box::new(sink.clone()));
        s.start();
        let display = match s.current_challenge() {
            Some(Challenge::ColorWord { display, .. }) => *display,
            other => panic!("expected color word, got {other:?}"),
        };
        let wrong = (display + 1) % 4;
        s.handle(Input::Fragment(Fragment::Color(wrong)));
        assert_eq!(s.status(), Status::Finished);
        assert_eq!(s.score(), 0); // -5 floored at zero

        let sent = sink.0.borrow();
        assert_eq!(sent.len(), 1);
        let (path, record) = &sent[0];
        assert_eq!(path, "/game/color_rush/save_result");
        assert_eq!(record.score, 0);
        // the fixed family always reports its configured round count
        assert_eq!(record.rounds, 10);
    }

    #[test]
    fn test_sequence_recall_escalates_then_stops_on_miss() {
        let mut s = Session::new(SequenceRecall::new(), Level::Easy, 33);
        s.start();
        assert_eq!(s.length(), 2);

        // two successful rounds: lengths 2 and 3
        for expected_len in [2u32, 3u32] {
            advance_until_accepting(&mut s, 30.0);
            let digits = sequence_digits(&s);
            assert_eq!(digits.len() as u32, expected_len);
            for d in digits {
                s.handle(Input::Fragment(Fragment::Digit(d)));
            }
            // auto-submitted on the last digit
            s.tick(1.6);
        }
        assert_eq!(s.length(), 4);

        // wrong recall at length 4 ends the session
        advance_until_accepting(&mut s, 30.0);
        let digits = sequence_digits(&s);
        for d in &digits[..digits.len() - 1] {
            s.handle(Input::Fragment(Fragment::Digit(*d)));
        }
        let last = (digits[digits.len() - 1] + 1) % 10;
        s.handle(Input::Fragment(Fragment::Digit(last)));
        s.tick(3.1);
        assert_eq!(s.status(), Status::Finished);

        // easy base 10: 10 + 15 for lengths 2 and 3, no penalty on the miss
        assert_eq!(s.score(), 25);
        let events = s.drain_events();
        let record = events
            .iter()
            .find_map(|e| match e {
                Event::SessionFinished { record, .. } => Some(record.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(record.rounds, 3); // failed length minus one
    }

    #[test]
    fn test_sequence_reveal_cadence_precedes_input() {
        let mut s = Session::new(SequenceRecall::new(), Level::Easy, 34);
        s.start();
        advance_until_accepting(&mut s, 30.0);
        let events = s.drain_events();
        let reveals: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                Event::SymbolRevealed { index } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(reveals, vec![0, 1]);
        let open_at = events
            .iter()
            .position(|e| matches!(e, Event::InputOpen { .. }))
            .unwrap();
        let last_reveal = events
            .iter()
            .rposition(|e| matches!(e, Event::SymbolRevealed { .. }))
            .unwrap();
        assert!(last_reveal < open_at);
    }

    #[test]
    fn test_tapping_timeout_with_zero_taps_is_timeout_not_failure() {
        let mut s = Session::new(
            TappingMemory::new(TappingVariant::Classic),
            Level::Easy,
            55,
        );
        s.start();
        advance_until_accepting(&mut s, 30.0);
        // easy length 2: 9 s limit; let it run out with no taps at all
        for _ in 0..200 {
            s.tick(0.05);
        }
        s.tick(1.0); // terminal feedback pause
        assert_eq!(s.status(), Status::Finished);
        let events = s.drain_events();
        let outcomes = resolved_outcomes(&events);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].kind, OutcomeKind::Timeout);
        assert_eq!(outcomes[0].points_delta, 0); // no partial credit, no penalty
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_silent_finish_withholds_persistence_by_default() {
        let sink = RecordingSink::default();
        let mut s =
            Session::new(Arithmetic::new(5), Level::Easy, 66).with_sink(Box::new(sink.clone()));
        s.start();
        s.tick(3.0);
        s.handle(Input::NavigateAway);
        assert_eq!(s.status(), Status::Finished);

        let events = s.drain_events();
        let silent = events.iter().any(
            |e| matches!(e, Event::SessionFinished { silent: true, .. }),
        );
        assert!(silent, "silent finish must still emit the session event");
        assert!(sink.0.borrow().is_empty());
    }

    #[test]
    fn test_revised_tapping_persists_on_silent_finish() {
        let sink = RecordingSink::default();
        let mut s = Session::new(
            TappingMemory::new(TappingVariant::Revised),
            Level::Easy,
            77,
        )
        .with_sink(Box::new(sink.clone()));
        s.start();
        s.tick(1.0);
        s.handle(Input::NavigateAway);

        let sent = sink.0.borrow();
        assert_eq!(sent.len(), 1);
        let (path, record) = &sent[0];
        assert_eq!(path, "/game/tapping_memory/save_result");
        assert!(record.avg_time.is_some());
    }

    #[test]
    fn test_finish_is_exactly_once() {
        let mut s = Session::new(Arithmetic::new(5), Level::Easy, 88);
        s.start();
        s.handle(Input::Finish);
        s.handle(Input::Finish);
        s.handle(Input::NavigateAway);
        let events = s.drain_events();
        let finishes = events
            .iter()
            .filter(|e| matches!(e, Event::SessionFinished { .. }))
            .count();
        assert_eq!(finishes, 1);
    }

    #[test]
    fn test_input_outside_accepting_phase_is_ignored() {
        let mut s = Session::new(SequenceRecall::new(), Level::Easy, 99);
        s.start();
        // still in the ready delay; digits must not register
        s.handle(Input::Fragment(Fragment::Digit(5)));
        s.handle(Input::Submit);
        assert!(resolved_outcomes(&s.drain_events()).is_empty());
        assert!(s.response().is_empty());
    }

    #[test]
    fn test_timer_ticks_reach_the_host() {
        let mut s = Session::new(Arithmetic::new(1), Level::Easy, 12);
        s.start();
        for _ in 0..25 {
            s.tick(0.1); // 2.5 s of a 10 s round
        }
        let events = s.drain_events();
        let ticks: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                Event::TimerTick { seconds_remaining } => Some(*seconds_remaining),
                _ => None,
            })
            .collect();
        assert_eq!(ticks, vec![9, 8]);
    }
}
