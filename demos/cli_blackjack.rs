//! CLI blackjack example driven entirely through public state strings.
//!
//! Set `BLACKJACK_STATE_KEY` to a base64 key to keep tokens valid across
//! runs, and `RUST_LOG=turnstate=debug` to watch the engine.

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use turnstate::{
    Blackjack, BlackjackState, Card, KeyOrigin, Outcome, PublicStateCodec, StateKeyConfig, Status,
    Suit, Token, Wager, hand_value,
};

const STARTING_STACK: u64 = 500;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let key = match StateKeyConfig::from_env().resolve() {
        Ok(key) => key,
        Err(err) => {
            error!(error = %err, "cannot load the state key");
            return;
        }
    };
    if key.origin() == KeyOrigin::Ephemeral {
        warn!("no state key configured; tokens from this run die with the process");
    }

    let codec = PublicStateCodec::new(&key);
    let table = Blackjack::default();
    let mut seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut stack = STARTING_STACK;

    println!("Blackjack CLI example (type 'q' to quit)");

    while stack > 0 {
        let Some(bet) = prompt_number(&format!("Bet amount (1-{stack}, 0 to quit): ")) else {
            break;
        };
        if bet == 0 {
            break;
        }

        let wager = match Wager::new(stack, bet) {
            Ok(wager) => wager,
            Err(err) => {
                println!("Bet error: {err}");
                continue;
            }
        };

        seed = seed.wrapping_add(1);
        let dealt = table
            .new_game(seed, Some(wager))
            .map_err(turnstate::Error::from)
            .and_then(|state| Ok(codec.encode_state(&state)?));
        let public = match dealt {
            Ok(public) => public,
            Err(err) => {
                println!("Deal error: {err}");
                continue;
            }
        };

        match play_round(&codec, &table, public) {
            Some(finished) => {
                report(&table, &finished);
                stack = finished.wager.map_or(stack, |wager| wager.stack);
            }
            None => break,
        }
    }

    println!("Leaving the table with {stack} chips.");
}

/// Plays one round to the end, returning the final state, or `None` on quit.
fn play_round(codec: &PublicStateCodec, table: &Blackjack, mut public: String) -> Option<BlackjackState> {
    loop {
        let state = match codec.decode_state(&public) {
            Ok(state) => state,
            Err(err) => {
                error!(error = %err, "lost track of the round");
                return None;
            }
        };
        print_table(&state);
        if state.status == Status::GameOver {
            return Some(state);
        }

        let action = match codec.dealer_public_actions(table, &public) {
            Ok(actions) if !actions.is_empty() => {
                let action = actions[0].as_str();
                println!("Dealer: {action}");
                action.to_owned()
            }
            Ok(_) => {
                let actions = codec.legal_public_actions(table, &public).unwrap_or_default();
                let names: Vec<&str> = actions.iter().map(|action| action.as_str()).collect();
                let input = prompt_line(&format!("Action [{}]: ", names.join("/")));
                if input == "q" {
                    return None;
                }
                input
            }
            Err(err) => {
                error!(error = %err, "lost track of the round");
                return None;
            }
        };

        match codec.apply_public_action(table, &public, &action) {
            Outcome::Applied(turn) => {
                info!(state = %turn.state, "public state");
                public = turn.state;
            }
            Outcome::Rejected(rejection) => println!("Action error: {}", rejection.error),
        }
    }
}

fn report(table: &Blackjack, state: &BlackjackState) {
    let Some(result) = table.round_result(state) else {
        return;
    };
    for hand in &result.hands {
        let verdict = hand.outcome.token();
        let verdict = if hand.outcome.is_loss() {
            format!("\x1b[31m{verdict}\x1b[0m")
        } else {
            verdict.to_owned()
        };
        println!(
            "Hand {}: {verdict} ({}), net {}",
            hand.hand_index + 1,
            hand.player_value,
            hand.net
        );
    }
    println!("Round net: {}\n", result.net);
}

fn print_table(state: &BlackjackState) {
    let dealer = state.dealer.visible_cards(state.reveals_dealer());
    let hidden = state.dealer.len() - dealer.len();
    let mut shown = format_cards(dealer);
    if hidden > 0 {
        shown.push_str(" ??");
    }
    println!("\nDealer: {shown} (value {})", hand_value(dealer).total);

    for (index, hand) in state.hands.iter().enumerate() {
        let marker = if index == state.hand_index && state.status == Status::InProgress {
            ">"
        } else {
            " "
        };
        println!(
            "{marker} Hand {}: {} (value {})",
            index + 1,
            format_cards(hand.cards()),
            hand.value().total
        );
    }
}

fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(no cards)".to_owned();
    }
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    format!("\x1b[{color_code}m{card}\x1b[0m")
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => return "q".to_owned(),
        Ok(_) => {}
    }
    input.trim().to_ascii_lowercase()
}

fn prompt_number(prompt: &str) -> Option<u64> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" {
            return None;
        }
        match input.parse() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}
