//! Implements the setup phase, where a player drags each ship onto the board.
use std::{
    borrow::Borrow,
    collections::{hash_map::Entry, HashMap},
    hash::Hash,
};

use glam::IVec2;
use log::debug;

use crate::{
    board::{AddShipError, BoardContext, SessionError},
    engine::{Highlight, PlacementEngine},
    ships::{Orientation, PlacedShip, ShipClass, ShipId, ShipPlacement},
};

/// Placement status of a single ship.
#[derive(Debug)]
enum ShipState {
    /// Still movable.
    Pending(ShipPlacement),
    /// Confirmed and frozen.
    Placed(PlacedShip),
}

/// Setup phase for one player's fleet. Owns every ship until all of them are placed,
/// then hands them off through [`finish`][Self::finish].
///
/// At most one ship is active at a time. The active ship follows the pointer, can be
/// rotated, and is committed by [`confirm`][Self::confirm]. Ships may overlap; the
/// session only checks that each one is fully on the board.
#[derive(Debug)]
pub struct PlacementSession<I: ShipId> {
    /// Geometry shared by every ship in the session.
    engine: PlacementEngine,

    /// Ship IDs in the order they were added.
    order: Vec<I>,

    /// Mapping of added ShipIds to their placement status.
    ships: HashMap<I, ShipState>,

    /// The ship currently following the pointer.
    active: Option<I>,

    /// Last known pointer position, reused when the active ship changes or rotates.
    pointer: Option<IVec2>,
}

impl<I: ShipId> PlacementSession<I> {
    /// Begin placement on the given board.
    pub fn new(board: BoardContext) -> Self {
        Self {
            engine: PlacementEngine::new(board),
            order: Vec::new(),
            ships: HashMap::new(),
            active: None,
            pointer: None,
        }
    }

    pub fn board(&self) -> &BoardContext {
        self.engine.board()
    }

    pub fn engine(&self) -> &PlacementEngine {
        &self.engine
    }

    /// Attempts to add a ship with the given ID. If the ID is already used, returns an
    /// error holding the ID and class. The first ship added becomes active.
    pub fn add_ship(&mut self, id: I, class: ShipClass) -> Result<(), AddShipError<I>> {
        match self.ships.entry(id.clone()) {
            Entry::Occupied(_) => Err(AddShipError::new(id, class)),
            Entry::Vacant(entry) => {
                entry.insert(ShipState::Pending(ShipPlacement::new(class)));
                self.order.push(id.clone());
                if self.active.is_none() {
                    self.activate(id);
                }
                Ok(())
            }
        }
    }

    /// Make the specified ship follow the pointer.
    pub fn select<Q: ?Sized>(&mut self, id: &Q) -> Result<&ShipPlacement, SessionError>
    where
        I: Borrow<Q>,
        Q: Hash + Eq,
    {
        let id = match self.ships.get_key_value(id) {
            None => return Err(SessionError::UnknownShip),
            Some((_, ShipState::Placed(_))) => return Err(SessionError::AlreadyPlaced),
            Some((id, ShipState::Pending(_))) => id.clone(),
        };
        self.activate(id);
        self.active()
            .map(|(_, placement)| placement)
            .ok_or(SessionError::NoActiveShip)
    }

    /// The active ship and its placement state, if any.
    pub fn active(&self) -> Option<(&I, &ShipPlacement)> {
        let id = self.active.as_ref()?;
        match self.ships.get_key_value(id)? {
            (id, ShipState::Pending(placement)) => Some((id, placement)),
            (_, ShipState::Placed(_)) => None,
        }
    }

    /// Last pointer position seen by the session.
    pub fn pointer(&self) -> Option<IVec2> {
        self.pointer
    }

    /// The placement state of a ship that has not been committed yet.
    pub fn placement<Q: ?Sized>(&self, id: &Q) -> Option<&ShipPlacement>
    where
        I: Borrow<Q>,
        Q: Hash + Eq,
    {
        match self.ships.get(id)? {
            ShipState::Pending(placement) => Some(placement),
            ShipState::Placed(_) => None,
        }
    }

    /// The committed position of a ship, if it has been placed.
    pub fn placed<Q: ?Sized>(&self, id: &Q) -> Option<&PlacedShip>
    where
        I: Borrow<Q>,
        Q: Hash + Eq,
    {
        match self.ships.get(id)? {
            ShipState::Placed(placed) => Some(placed),
            ShipState::Pending(_) => None,
        }
    }

    /// Move the pointer, re-highlighting the active ship. Returns `None` if there is no
    /// active ship.
    pub fn pointer_moved(&mut self, pointer: IVec2) -> Option<Highlight> {
        self.pointer = Some(pointer);
        self.rehighlight()
    }

    /// Set the orientation of the active ship and re-highlight it at the last pointer
    /// position.
    pub fn orient(
        &mut self,
        orientation: Orientation,
    ) -> Result<Option<Highlight>, SessionError> {
        self.active_placement_mut()?.set_orientation(orientation);
        Ok(self.rehighlight())
    }

    /// Give the active ship a quarter turn. Returns the new orientation.
    pub fn rotate(&mut self) -> Result<Orientation, SessionError> {
        let orientation = self.active_placement_mut()?.rotate();
        debug!("rotated active ship to {:?}", orientation);
        self.rehighlight();
        Ok(orientation)
    }

    /// Commit the active ship at its highlighted position. On success the next pending
    /// ship, if any, becomes active. On failure the active ship is left as it was.
    pub fn confirm(&mut self) -> Result<&PlacedShip, SessionError> {
        let id = self.active.clone().ok_or(SessionError::NoActiveShip)?;
        let placement = match self.ships.remove(&id) {
            Some(ShipState::Pending(placement)) => placement,
            Some(placed) => {
                self.ships.insert(id, placed);
                self.active = None;
                return Err(SessionError::NoActiveShip);
            }
            None => {
                self.active = None;
                return Err(SessionError::NoActiveShip);
            }
        };
        match self.engine.commit(placement) {
            Ok(placed) => {
                self.ships.insert(id.clone(), ShipState::Placed(placed));
                self.active = None;
                let next = self.pending_ships().next().cloned();
                if let Some(next) = next {
                    self.activate(next);
                }
            }
            Err(err) => {
                let reason = err.reason();
                self.ships
                    .insert(id, ShipState::Pending(err.into_placement()));
                return Err(reason.into());
            }
        }
        self.placed(&id).ok_or(SessionError::UnknownShip)
    }

    /// Return a committed ship to placement. The ship becomes active if no other ship
    /// is. Returns true if the ship was previously placed.
    pub fn unplace<Q: ?Sized>(&mut self, id: &Q) -> bool
    where
        I: Borrow<Q>,
        Q: Hash + Eq,
    {
        let (id, state) = match self.ships.remove_entry(id) {
            Some(entry) => entry,
            None => return false,
        };
        match state {
            ShipState::Placed(placed) => {
                self.ships
                    .insert(id.clone(), ShipState::Pending(placed.into_placement()));
                if self.active.is_none() {
                    self.activate(id);
                }
                true
            }
            pending => {
                self.ships.insert(id, pending);
                false
            }
        }
    }

    /// Checks if this fleet is ready to hand off. Returns `true` if at least one ship has
    /// been added and all ships are placed.
    pub fn ready(&self) -> bool {
        !self.ships.is_empty()
            && self
                .ships
                .values()
                .all(|ship| matches!(ship, ShipState::Placed(_)))
    }

    /// Get an iterator over the IDs of any ships which still need to be placed, in the
    /// order they were added.
    pub fn pending_ships(&self) -> impl Iterator<Item = &I> {
        let ships = &self.ships;
        self.order
            .iter()
            .filter(move |id| matches!(ships.get(*id), Some(ShipState::Pending(_))))
    }

    /// Get an iterator over the ships which have been placed, in the order they were
    /// added.
    pub fn placed_ships(&self) -> impl Iterator<Item = (&I, &PlacedShip)> {
        let ships = &self.ships;
        self.order.iter().filter_map(move |id| match ships.get(id) {
            Some(ShipState::Placed(placed)) => Some((id, placed)),
            _ => None,
        })
    }

    /// Finish setup. If all ships are placed, returns them in the order they were added.
    /// If no ships have been added or any ship has not been placed, returns self.
    pub fn finish(self) -> Result<Vec<(I, PlacedShip)>, Self> {
        if !self.ready() {
            return Err(self);
        }
        let Self {
            order, mut ships, ..
        } = self;
        Ok(order
            .into_iter()
            .filter_map(|id| match ships.remove(&id) {
                Some(ShipState::Placed(placed)) => Some((id, placed)),
                _ => None,
            })
            .collect())
    }

    /// Mark the given ship active and highlight it under the last known pointer.
    fn activate(&mut self, id: I) {
        debug!("ship {:?} is now following the pointer", id);
        self.active = Some(id);
        self.rehighlight();
    }

    /// Re-run highlighting for the active ship at the last pointer position.
    fn rehighlight(&mut self) -> Option<Highlight> {
        let pointer = self.pointer?;
        let engine = self.engine;
        let id = self.active.as_ref()?;
        match self.ships.get_mut(id)? {
            ShipState::Pending(placement) => {
                Some(engine.highlight_squares(pointer, placement))
            }
            ShipState::Placed(_) => None,
        }
    }

    fn active_placement_mut(&mut self) -> Result<&mut ShipPlacement, SessionError> {
        let id = self.active.as_ref().ok_or(SessionError::NoActiveShip)?;
        match self.ships.get_mut(id) {
            Some(ShipState::Pending(placement)) => Ok(placement),
            _ => Err(SessionError::NoActiveShip),
        }
    }
}
