//! Room presentation model.
//!
//! The server's room pushes are not guaranteed gap-free, so the model never
//! patches seats incrementally: every room-update replaces the entire seat
//! sequence, which makes reconciliation idempotent by construction.
//! Single-player deltas (player-added / player-removed) are surfaced as
//! status lines only; the authoritative seat list arrives in the full
//! snapshot the server sends right after.

use crate::game::entities::{Player, PlayerId, Seat, SeatIndex};
use crate::net::messages::RoomSnapshot;
use crate::view::RoomView;

#[derive(Debug, Default)]
pub struct RoomState {
    room_id: Option<String>,
    seats: Vec<Seat>,
    joinable: bool,
}

impl RoomState {
    /// Replace the entire seat sequence from a server snapshot.
    ///
    /// A seat whose occupant id is missing from the player map is treated
    /// as empty; that is a data-level server inconsistency, logged and
    /// survived rather than escalated.
    pub fn reconcile(&mut self, snapshot: RoomSnapshot) -> RoomView {
        if snapshot.room_id.is_some() {
            self.room_id = snapshot.room_id;
        }
        self.seats = snapshot
            .player_ids
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let occupant = id.as_ref().and_then(|id| {
                    let player = snapshot.players.get(id).cloned();
                    if player.is_none() {
                        log::warn!("seat {index} names unknown player {id}, leaving it empty");
                    }
                    player
                });
                Seat { index, occupant }
            })
            .collect();
        self.joinable = snapshot.can_start;
        self.view()
    }

    /// The full current seat list plus the joinable flag.
    pub fn view(&self) -> RoomView {
        RoomView {
            seats: self.seats.clone(),
            joinable: self.joinable,
        }
    }

    /// Replace one occupant's name/money snapshot in place. Game events
    /// carry these snapshots; seat membership itself never changes here.
    pub fn update_player(&mut self, player: &Player) {
        match self.occupant_mut(&player.id) {
            Some(occupant) => *occupant = player.clone(),
            None => log::debug!("snapshot for {} who holds no seat", player.id),
        }
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat_of(&self, id: &PlayerId) -> Option<SeatIndex> {
        self.seats
            .iter()
            .position(|seat| seat.occupant.as_ref().is_some_and(|p| &p.id == id))
    }

    pub fn occupants(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().filter_map(|seat| seat.occupant.as_ref())
    }

    /// Tear the room down to the pre-join state.
    pub fn clear(&mut self) {
        self.room_id = None;
        self.seats.clear();
        self.joinable = false;
    }

    fn occupant_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.seats
            .iter_mut()
            .filter_map(|seat| seat.occupant.as_mut())
            .find(|p| &p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn snapshot(ids: &[Option<&str>], players: &[(&str, &str, u32)]) -> RoomSnapshot {
        RoomSnapshot {
            room_id: Some("room-1".into()),
            player_ids: ids
                .iter()
                .map(|id| id.map(PlayerId::from))
                .collect(),
            players: players
                .iter()
                .map(|(id, name, money)| {
                    (
                        PlayerId::from(*id),
                        Player {
                            id: PlayerId::from(*id),
                            name: name.to_string(),
                            money: *money,
                        },
                    )
                })
                .collect::<HashMap<_, _>>(),
            can_start: true,
        }
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut room = RoomState::default();
        let snap = snapshot(
            &[Some("a"), None, Some("b")],
            &[("a", "alice", 100), ("b", "bob", 250)],
        );
        let first = room.reconcile(snap.clone());
        let second = room.reconcile(snap);
        assert_eq!(first, second);
        assert_eq!(room.seats().len(), 3);
        assert!(room.seats()[1].occupant.is_none());
    }

    #[test]
    fn reconcile_replaces_wholesale() {
        let mut room = RoomState::default();
        room.reconcile(snapshot(
            &[Some("a"), Some("b")],
            &[("a", "alice", 100), ("b", "bob", 250)],
        ));
        let view = room.reconcile(snapshot(&[Some("b")], &[("b", "bob", 250)]));
        assert_eq!(view.seats.len(), 1);
        assert_eq!(room.seat_of(&PlayerId::from("a")), None);
        assert_eq!(room.seat_of(&PlayerId::from("b")), Some(0));
    }

    #[test]
    fn unknown_occupant_leaves_seat_empty() {
        let mut room = RoomState::default();
        let view = room.reconcile(snapshot(&[Some("ghost")], &[]));
        assert!(view.seats[0].occupant.is_none());
    }

    #[test]
    fn update_player_touches_money_only_for_seated_ids() {
        let mut room = RoomState::default();
        room.reconcile(snapshot(&[Some("a")], &[("a", "alice", 100)]));
        room.update_player(&Player {
            id: PlayerId::from("a"),
            name: "alice".into(),
            money: 80,
        });
        assert_eq!(room.occupants().next().unwrap().money, 80);

        // Snapshot for a stranger is ignored.
        room.update_player(&Player {
            id: PlayerId::from("z"),
            name: "zoe".into(),
            money: 9,
        });
        assert_eq!(room.occupants().count(), 1);
    }

    #[test]
    fn clear_resets_to_pre_join_state() {
        let mut room = RoomState::default();
        room.reconcile(snapshot(&[Some("a")], &[("a", "alice", 100)]));
        room.clear();
        assert!(room.seats().is_empty());
        assert!(room.room_id().is_none());
        assert!(!room.view().joinable);
    }
}
