#![allow(dead_code)]

pub mod architecture;
pub mod bot_db;
pub mod http;
