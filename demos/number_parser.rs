//! Number Parser
//!
//! This example recognises decimal numbers with a five-state machine.
//!
//! Key concepts:
//! - Closed state and event sets declared with `symbols!`
//! - Entry actions consuming input held in caller-owned data
//! - Static dispatch (`advance`) and runtime dispatch (`advance_tag`)
//! - PlantUML export of the process template
//!
//! Run with: cargo run --example number_parser -- 32 101.57 32,000
//! Set RUST_LOG=statelink=trace to watch links fire.

use statelink::core::{State, Tag};
use statelink::{symbols, BuildError, Machine, ProcessTemplate};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

symbols! {
    enum Number {
        Start,
        Digit1,
        Decimal,
        Digit2,
        End,
    }
}

symbols! {
    enum Token {
        Digit,
        Dot,
        Done,
    }
}

// Parser data
#[derive(Default)]
struct Cursor {
    input: Vec<char>,
    pos: usize,
    out: String,
}

impl Cursor {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            ..Self::default()
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }
}

#[derive(Debug, Error)]
enum ParseError {
    #[error("unexpected {found:?} at position {position}")]
    Unexpected { found: char, position: usize },

    #[error("input ended early at position {position}")]
    Truncated { position: usize },
}

impl ParseError {
    fn at(cursor: &Cursor) -> Self {
        match cursor.peek() {
            Some(found) => Self::Unexpected {
                found,
                position: cursor.pos,
            },
            None => Self::Truncated {
                position: cursor.pos,
            },
        }
    }
}

#[derive(Clone, Copy)]
enum Dispatch {
    Static,
    Dynamic,
}

fn consume(cursor: &mut Cursor) {
    if let Some(c) = cursor.peek() {
        cursor.pos += 1;
        cursor.out.push(c);
    }
}

fn number_parser() -> Result<ProcessTemplate<Number, Token, Cursor>, BuildError> {
    let machine = Machine::builder()
        .state(State::new(Number::Digit1).on_enter(consume))
        .state(State::new(Number::Decimal).on_enter(consume))
        .state(State::new(Number::Digit2).on_enter(consume))
        .link(Number::Start, Token::Digit, Number::Digit1)
        .link(Number::Digit1, Token::Digit, Number::Digit1)
        .link(Number::Digit1, Token::Dot, Number::Decimal)
        .link(Number::Digit1, Token::Done, Number::End)
        .link(Number::Decimal, Token::Digit, Number::Digit2)
        .link(Number::Decimal, Token::Done, Number::End)
        .link(Number::Digit2, Token::Digit, Number::Digit2)
        .link(Number::Digit2, Token::Done, Number::End)
        .build()?;

    ProcessTemplate::new(machine, Number::Start, Number::End)
}

fn classify(cursor: &Cursor) -> Tag<Token> {
    let mut tag = Tag::new();
    match cursor.peek() {
        None => tag.set(Token::Done),
        Some('.') => tag.set(Token::Dot),
        Some(c) if c.is_ascii_digit() => tag.set(Token::Digit),
        Some(_) => {}
    }
    tag
}

fn parse(
    template: &ProcessTemplate<Number, Token, Cursor>,
    input: &str,
    dispatch: Dispatch,
) -> Result<String, ParseError> {
    let mut cursor = Cursor::new(input);
    let mut process = template.bind(&mut cursor);

    let mut ok = process.start();
    while ok && !process.done() {
        let token = classify(process.data());
        ok = match dispatch {
            Dispatch::Static => token.symbol().is_some_and(|t| process.advance(t)),
            Dispatch::Dynamic => process.advance_tag(&token),
        };
    }

    if ok {
        Ok(cursor.out)
    } else {
        Err(ParseError::at(&cursor))
    }
}

fn main() -> Result<(), BuildError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Number Parser ===\n");

    let template = number_parser()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs: Vec<String> = if args.is_empty() {
        ["32", "101.57", "32,000"].map(String::from).to_vec()
    } else {
        args
    };

    for (label, dispatch) in [("static", Dispatch::Static), ("dynamic", Dispatch::Dynamic)] {
        println!("{label} dispatch:");
        for input in &inputs {
            match parse(&template, input, dispatch) {
                Ok(out) => println!("  {input:>10} -> {out}"),
                Err(err) => println!("  {input:>10} -> error: {err}"),
            }
        }
        println!();
    }

    println!("{}", template.to_uml());
    Ok(())
}
