//! Doors, keys, treasure boxes, restart areas and the store.

use crate::config::StoreConfig;
use crate::entities::{Door, DoorState, KeyPickup, Player, RestartArea, RoomId, Store, TreasureBox};
use crate::geometry::Collidable;
use crate::input::{FrameInput, GameKey};

// ── Doors ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorEvent {
    /// The player walked into a settled door.
    Enter(RoomId),
    /// The player stepped off the arrival door of an uncleared battle room;
    /// the door locked again and the encounter must be re-armed.
    Relocked,
}

/// Advance one door for this tick.
///
/// `encounter_cleared` says whether every enemy of the owning room is dead.
/// Locked doors never report anything here; they block the player during
/// movement instead.
pub fn update_door(door: &mut Door, player: &Player, encounter_cleared: bool) -> Option<DoorEvent> {
    if door.collides_with(player) {
        return match door.state {
            DoorState::Settled => Some(DoorEvent::Enter(door.destination)),
            DoorState::JustEntered | DoorState::Locked => None,
        };
    }

    if door.state != DoorState::JustEntered {
        return None;
    }
    if door.relock && !encounter_cleared {
        door.relock = false;
        door.lock();
        return Some(DoorEvent::Relocked);
    }
    door.state = DoorState::Settled;
    None
}

// ── Pickups ──────────────────────────────────────────────────────────────────

/// Open every box the player overlaps while pressing unlock with a key to
/// spare. Nothing is consumed otherwise.
pub fn open_treasure_boxes(boxes: &mut [TreasureBox], player: &mut Player, input: &FrameInput) {
    if !input.was_pressed(GameKey::Unlock) {
        return;
    }
    for chest in boxes.iter_mut().filter(|b| b.active) {
        if chest.collides_with(&*player) && player.use_key() {
            chest.active = false;
            player.earn_coins(chest.coins);
            log::debug!("treasure box opened for {} coins", chest.coins);
        }
    }
}

/// Keys are picked up just by touching them.
pub fn collect_keys(keys: &mut [KeyPickup], player: &mut Player) {
    for key in keys.iter_mut().filter(|k| k.active) {
        if key.collides_with(&*player) {
            key.active = false;
            player.earn_key();
        }
    }
}

pub fn restart_requested(area: Option<&RestartArea>, player: &Player, input: &FrameInput) -> bool {
    match area {
        Some(area) => input.was_pressed(GameKey::Confirm) && area.collides_with(player),
        None => false,
    }
}

// ── Store ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreAction {
    None,
    Restart,
}

pub fn buy_weapon_upgrade(player: &mut Player, config: &StoreConfig) -> bool {
    if player.weapon.next().is_none() || player.coins < config.weapon_cost {
        return false;
    }
    player.spend_coins(config.weapon_cost) && player.upgrade_weapon()
}

pub fn buy_health(player: &mut Player, config: &StoreConfig) -> bool {
    if !player.spend_coins(config.health_cost) {
        return false;
    }
    player.add_health(config.health_bonus);
    true
}

/// Toggle the store on the pause key and, while it is open, serve purchases.
pub fn update_store(
    store: &mut Store,
    player: &mut Player,
    input: &FrameInput,
    config: &StoreConfig,
) -> StoreAction {
    if input.was_pressed(GameKey::ToggleStore) {
        store.toggle();
    }
    if !store.visible {
        return StoreAction::None;
    }

    if input.was_pressed(GameKey::UpgradeWeapon) {
        if buy_weapon_upgrade(player, config) {
            log::info!("weapon upgraded to {:?}", player.weapon);
        } else {
            log::debug!("weapon upgrade refused");
        }
    }
    if input.was_pressed(GameKey::BuyHealth) {
        if buy_health(player, config) {
            log::info!("health bought, now {:.1}", player.health);
        } else {
            log::debug!("health purchase refused");
        }
    }
    if input.was_pressed(GameKey::StoreRestart) {
        return StoreAction::Restart;
    }
    StoreAction::None
}
