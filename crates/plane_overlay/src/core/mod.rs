//! Core crate configuration

pub mod config;

pub use config::{
    OverlayConfig, PlaneRendererConfig, AttachmentConfig,
};
