//! Conversions between the wire representation and the domain model.
//!
//! Stateless and bidirectional. Domain → DTO is lossless; DTO → domain drops
//! the server-managed timestamps so the store remains their only writer.

use crate::models::{User, UserDto};

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            name: user.name,
            email_address: user.email_address,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            // Wire timestamps are ignored on input.
            created_at: None,
            updated_at: None,
            name: dto.name,
            email_address: dto.email_address,
            first_name: dto.first_name,
            last_name: dto.last_name,
        }
    }
}
