#![cfg(feature = "serde")]

use chesscore::{Color, Move, MoveKind, Role, Square};

#[test]
fn test_move_json() {
    let m = Move::new(Square::E7, Square::E8, MoveKind::Promotion(Role::Knight));
    let json = serde_json::to_string(&m).expect("serializable");
    assert_eq!(json, r#"{"from":"e7","to":"e8","kind":{"Promotion":"knight"}}"#);
    assert_eq!(serde_json::from_str::<Move>(&json).expect("deserializable"), m);
}

#[test]
fn test_vocabulary_json() {
    assert_eq!(serde_json::to_string(&Color::Black).expect("serializable"), r#""black""#);
    assert_eq!(
        serde_json::from_str::<Square>(r#""h1""#).expect("deserializable"),
        Square::H1
    );
    assert!(serde_json::from_str::<Square>(r#""i9""#).is_err());
}
