/// Frame sequencing: persistence, re-seeding and timeline intensification.
pub mod driver;
