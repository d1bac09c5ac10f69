use battleship_placement::{
    board::{CannotPlaceReason, SessionError},
    BoardContext, Cell, Highlight, Orientation, PlacementSession, ShipClass,
};
use glam::{IVec2, Vec2};

fn session() -> PlacementSession<&'static str> {
    let board = BoardContext::new(IVec2::new(25, 100), 400, 10).unwrap();
    let mut session = PlacementSession::new(board);
    session.add_ship("flagship", ShipClass::Carrier).unwrap();
    session.add_ship("scout", ShipClass::Patrol).unwrap();
    session
}

#[test]
fn first_ship_added_is_active() {
    let session = session();
    let (id, placement) = session.active().unwrap();
    assert_eq!(*id, "flagship");
    assert_eq!(placement.class(), ShipClass::Carrier);
    assert!(
        placement.is_deselected(),
        "nothing is highlighted before the pointer moves"
    );
    assert_eq!(
        session.pending_ships().collect::<Vec<_>>(),
        vec![&"flagship", &"scout"]
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut session = session();
    let err = session.add_ship("scout", ShipClass::Frigate).unwrap_err();
    assert_eq!(err.into_inner(), ("scout", ShipClass::Frigate));
    assert_eq!(session.placement("scout").unwrap().class(), ShipClass::Patrol);
}

#[test]
fn confirm_commits_and_advances() {
    let mut session = session();
    assert_eq!(
        session.pointer_moved(IVec2::new(245, 120)),
        Some(Highlight::Valid)
    );
    let placed = session.confirm().unwrap().clone();
    // Anchor column (245 - 20 - 25) / 40 = 5, row 0: columns 3..=7.
    assert_eq!(placed.cells()[0], Cell::new(3, 0));
    assert_eq!(placed.anchor(), Vec2::new(25.0 + 5.0 * 40.0 + 20.0, 120.0));
    assert_eq!(session.placed("flagship"), Some(&placed));

    let (id, scout) = session.active().unwrap();
    assert_eq!(*id, "scout");
    assert!(
        scout.is_fully_valid(),
        "the next ship is highlighted under the last pointer position"
    );
    assert!(!session.ready());
}

#[test]
fn confirm_off_board_keeps_ship_active() {
    let mut session = session();
    assert_eq!(
        session.confirm().unwrap_err(),
        SessionError::Place(CannotPlaceReason::NotSelected)
    );

    assert_eq!(
        session.pointer_moved(IVec2::new(45, 120)),
        Some(Highlight::Partial)
    );
    assert_eq!(
        session.confirm().unwrap_err(),
        SessionError::Place(CannotPlaceReason::OutOfBounds)
    );
    assert_eq!(*session.active().unwrap().0, "flagship");
    assert!(session.placed("flagship").is_none());
}

#[test]
fn rotate_rehighlights_at_last_pointer() {
    let mut session = session();
    session.pointer_moved(IVec2::new(245, 120));
    assert_eq!(session.rotate(), Ok(Orientation::Vertical));
    let (_, placement) = session.active().unwrap();
    assert_eq!(placement.orientation(), Orientation::Vertical);
    // Column (245 - 25) / 40 = 5, row (120 - 20 - 100) / 40 = 0: rows -2..=2.
    let valid: Vec<bool> = placement.slots().iter().map(|slot| slot.valid()).collect();
    assert_eq!(valid, vec![false, false, true, true, true]);

    assert_eq!(
        session.orient(Orientation::Horizontal),
        Ok(Some(Highlight::Valid))
    );
}

#[test]
fn select_switches_active_ship() {
    let mut session = session();
    session.pointer_moved(IVec2::new(245, 300));
    let scout = session.select("scout").unwrap();
    assert_eq!(scout.class(), ShipClass::Patrol);
    assert!(scout.is_fully_valid());
    assert_eq!(session.select("tug").unwrap_err(), SessionError::UnknownShip);

    session.confirm().unwrap();
    assert_eq!(session.select("scout").unwrap_err(), SessionError::AlreadyPlaced);
    assert_eq!(*session.active().unwrap().0, "flagship");
}

#[test]
fn unplace_returns_ship_to_placement() {
    let mut session = session();
    session.pointer_moved(IVec2::new(245, 300));
    session.confirm().unwrap();
    session.confirm().unwrap();
    assert!(session.ready());
    assert!(session.active().is_none());
    assert_eq!(session.rotate(), Err(SessionError::NoActiveShip));
    assert_eq!(
        session.orient(Orientation::Vertical),
        Err(SessionError::NoActiveShip)
    );

    assert!(session.unplace("scout"));
    assert!(!session.unplace("scout"));
    assert!(!session.unplace("tug"));
    let (id, scout) = session.active().unwrap();
    assert_eq!(*id, "scout");
    assert!(scout.is_fully_valid());
    assert!(!session.ready());
}

#[test]
fn finish_hands_off_in_insertion_order() {
    let mut session = match session().finish() {
        Ok(_) => panic!("finished before any ship was placed"),
        Err(session) => session,
    };
    session.pointer_moved(IVec2::new(245, 300));
    session.confirm().unwrap();
    session.pointer_moved(IVec2::new(245, 140));
    session.confirm().unwrap();

    let fleet = session.finish().unwrap();
    let ids: Vec<&str> = fleet.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec!["flagship", "scout"]);
    assert_eq!(fleet[1].1.cells(), &[Cell::new(5, 1), Cell::new(6, 1)][..]);
}

#[test]
fn empty_session_is_never_ready() {
    let board = BoardContext::new(IVec2::ZERO, 400, 10).unwrap();
    let mut session: PlacementSession<u32> = PlacementSession::new(board);
    assert!(!session.ready());
    assert_eq!(session.pointer_moved(IVec2::new(10, 10)), None);
    assert_eq!(session.confirm().unwrap_err(), SessionError::NoActiveShip);
    assert!(session.finish().is_err());
}
