//! Text rendering of view commands.
//!
//! The stand-in for the real sprite-based render layer: each view command
//! becomes one or two plain lines. Card validity still goes through the
//! codec, exactly as the sprite renderer would; an invalid card is skipped
//! without disturbing its siblings.

use chrono::Utc;
use poker_sync::codec::{self, CardSize};
use poker_sync::view::{BetPrompt, RoomView, ViewCommand};
use poker_sync::{Card, Money, PlayerId};
use std::collections::HashMap;

pub fn render(command: &ViewCommand) {
    match command {
        ViewCommand::RoomChanged(view) => render_room(view),
        ViewCommand::Status(line) => println!("[table] {line}"),
        ViewCommand::ControlsCleared => {}
        ViewCommand::HandStarted {
            game_id,
            kind,
            dealer_id,
            seat_card_count,
        } => {
            println!(
                "[game]  new {kind} hand{} — dealer {dealer_id}, {seat_card_count} cards each",
                game_id
                    .as_deref()
                    .map(|id| format!(" {id}"))
                    .unwrap_or_default()
            );
        }
        ViewCommand::HandCleared => println!("[game]  hand over, board cleared"),
        ViewCommand::BoardFrozen => println!("[game]  showdown concluded"),
        ViewCommand::CardBacksShown { player_id, count } => {
            println!("[cards] {player_id}: {}", "🂠 ".repeat(*count).trim_end());
        }
        ViewCommand::CardsRevealed {
            player_id,
            cards,
            score_label,
        } => {
            let repr = cards_line(cards);
            match score_label {
                Some(label) => println!("[cards] {player_id}: {repr} ({label})"),
                None => println!("[cards] {player_id}: {repr}"),
            }
        }
        ViewCommand::PlayerFolded { player_id } => println!("[game]  {player_id} folds"),
        ViewCommand::PlayerChanged(player) => println!("[seat]  {player}"),
        ViewCommand::BetsChanged(bets) => render_bets(bets),
        ViewCommand::PotsChanged(pots) => {
            let repr: Vec<String> = pots.iter().map(|pot| format!("${}", pot.money)).collect();
            println!(
                "[pots]  {}",
                if repr.is_empty() {
                    "—".to_string()
                } else {
                    repr.join("  ")
                }
            );
        }
        ViewCommand::SharedCardsDealt(cards) => {
            println!("[board] {}", cards_line(cards));
        }
        ViewCommand::ExchangeAnimated { player_id, count } => {
            println!("[game]  {player_id} exchanges {count} card(s)");
        }
        ViewCommand::CountdownStarted {
            player_id,
            deadline,
        } => {
            let remaining = (*deadline - Utc::now()).num_seconds().max(0);
            println!("[timer] {player_id} to act, {remaining}s");
        }
        ViewCommand::BetControlsOpened(BetPrompt {
            min_bet,
            max_bet,
            fold_is_pass,
        }) => {
            let negative = if *fold_is_pass { "pass" } else { "fold" };
            println!("[you]   bet <{min_bet}..{max_bet}>, check, or {negative}");
        }
        ViewCommand::AckControlsOpened => {
            println!("[you]   you may not bet this round; enter check to acknowledge");
        }
        ViewCommand::ExchangeControlsOpened => {
            println!("[you]   choose discards: swap <index...> (empty keeps all)");
        }
    }
}

fn render_room(view: &RoomView) {
    println!(
        "[room]  {} seat(s){}",
        view.seats.len(),
        if view.joinable { ", ready to start" } else { "" }
    );
    for seat in &view.seats {
        match &seat.occupant {
            Some(player) => println!("[room]    {}. {player}", seat.index),
            None => println!("[room]    {}. (empty seat)", seat.index),
        }
    }
}

fn render_bets(bets: &HashMap<PlayerId, Money>) {
    if bets.is_empty() {
        println!("[bets]  —");
        return;
    }
    let mut entries: Vec<_> = bets.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    let repr: Vec<String> = entries
        .iter()
        .map(|(id, amount)| format!("{id} ${amount}"))
        .collect();
    println!("[bets]  {}", repr.join("  "));
}

/// Join a card batch into one line, skipping anything the sheet cannot
/// depict. The codec is the single validity gate, for glyphs as for
/// sprites.
fn cards_line(cards: &[Card]) -> String {
    let repr: Vec<String> = cards
        .iter()
        .filter_map(|card| match codec::encode(*card, CardSize::Small) {
            Ok(_) => Some(card.to_string()),
            Err(error) => {
                log::warn!("skipping unrenderable card: {error}");
                None
            }
        })
        .collect();
    if repr.is_empty() {
        "—".to_string()
    } else {
        repr.join(" ")
    }
}
