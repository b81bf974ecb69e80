#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use ix_mapper as mapper;
pub use ix_meta as meta;
pub use ix_utils as utils;
