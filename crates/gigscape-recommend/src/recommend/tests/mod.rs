mod common;
mod features;
