//! External collaborators. All local; nothing here talks to a network.

pub mod metadata;
