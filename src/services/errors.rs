use crate::{db::dao::DaoLayerError, error::AppError};

#[derive(Clone, Copy, Debug)]
pub enum CrudOp {
    Create,
    Find,
    List,
    Update,
    Delete,
}

/// Turns DAO failures into the messages shown for one kind of listing.
#[derive(Clone, Copy, Debug)]
pub struct CrudErrors {
    /// Capitalised, e.g. `Venue`.
    pub kind: &'static str,
    /// Lowercase, e.g. `venue`.
    pub noun: &'static str,
}

impl CrudErrors {
    pub const fn new(kind: &'static str, noun: &'static str) -> Self {
        Self { kind, noun }
    }

    pub fn not_found(&self) -> AppError {
        AppError::not_found(format!("{} not found", self.kind))
    }

    /// `name` is the submitted record name; it is only used by write messages.
    pub fn map_error(&self, op: CrudOp, name: &str, err: DaoLayerError) -> AppError {
        match err {
            DaoLayerError::NotFound { .. } => self.not_found(),
            DaoLayerError::Db(source) => {
                let message = match op {
                    CrudOp::Create if name.is_empty() => {
                        format!("An error occurred. {} could not be listed.", self.kind)
                    }
                    CrudOp::Create => {
                        format!("An error occurred. {} {name} could not be listed.", self.kind)
                    }
                    CrudOp::Update => {
                        format!("There was an error trying to update {}, {name}.", self.noun)
                    }
                    CrudOp::Delete => format!("There was a problem deleting the {}.", self.noun),
                    CrudOp::Find | CrudOp::List => {
                        format!("There was a problem loading {} listings.", self.noun)
                    }
                };
                AppError::persistence(message, source)
            }
        }
    }
}
