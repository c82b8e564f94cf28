pub mod action;
pub mod card;
pub mod event;
pub mod hand;
pub mod player;
pub mod view;
