pub mod curriculum_repository;
pub mod user_repository;

pub use curriculum_repository::{CurriculumRepository, MongoCurriculumRepository};
pub use user_repository::{MongoUserRepository, UserRepository};

#[cfg(test)]
pub use curriculum_repository::MockCurriculumRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

/// True when the error is a MongoDB duplicate-key violation (code 11000),
/// i.e. an insert raced another writer on a unique index.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}
