//! Wire <-> domain conversions
//!
//! Pure mappings between the `user_v1` messages and the domain model.
//! A creation time at the Unix epoch is the domain's zero value and is
//! sent as an absent timestamp.

use chrono::{DateTime, Utc};

use super::user_v1;
use crate::domain;

const NANOS_PER_SECOND: i32 = 1_000_000_000;

impl From<user_v1::Role> for domain::Role {
    fn from(role: user_v1::Role) -> Self {
        match role {
            user_v1::Role::User => Self::User,
            user_v1::Role::Admin => Self::Admin,
        }
    }
}

impl From<domain::Role> for user_v1::Role {
    fn from(role: domain::Role) -> Self {
        match role {
            domain::Role::User => Self::User,
            domain::Role::Admin => Self::Admin,
        }
    }
}

impl From<DateTime<Utc>> for user_v1::Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos() as i32,
        }
    }
}

impl user_v1::Timestamp {
    /// Convert to a UTC instant. `None` if the value is out of range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if !(0..NANOS_PER_SECOND).contains(&self.nanos) {
            return None;
        }
        DateTime::from_timestamp(self.seconds, self.nanos as u32)
    }
}

impl From<user_v1::UserFields> for domain::UserFields {
    fn from(fields: user_v1::UserFields) -> Self {
        Self {
            name: fields.name,
            email: fields.email,
            role: fields.role.into(),
            password: fields.password,
            password_confirm: fields.password_confirm,
        }
    }
}

impl From<domain::UserFields> for user_v1::UserFields {
    fn from(fields: domain::UserFields) -> Self {
        Self {
            name: fields.name,
            email: fields.email,
            password: fields.password,
            password_confirm: fields.password_confirm,
            role: fields.role.into(),
        }
    }
}

impl From<user_v1::User> for domain::User {
    fn from(user: user_v1::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.into(),
            created_at: user
                .created_at
                .and_then(user_v1::Timestamp::to_datetime)
                .unwrap_or_default(),
            updated_at: user.updated_at.and_then(user_v1::Timestamp::to_datetime),
        }
    }
}

impl From<domain::User> for user_v1::User {
    fn from(user: domain::User) -> Self {
        let created_at = (user.created_at != DateTime::<Utc>::default())
            .then(|| user_v1::Timestamp::from(user.created_at));

        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.into(),
            created_at,
            updated_at: user.updated_at.map(user_v1::Timestamp::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    fn domain_user(updated_at: Option<DateTime<Utc>>) -> domain::User {
        domain::User {
            id: 1,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            role: domain::Role::Admin,
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
                .unwrap()
                .with_nanosecond(123_456_789)
                .unwrap(),
            updated_at,
        }
    }

    #[test]
    fn user_round_trips_through_wire_shape() {
        let updated = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let user = domain_user(Some(updated));

        let wire = user_v1::User::from(user.clone());
        assert_eq!(wire.role, user_v1::Role::Admin);
        assert_eq!(wire.created_at.unwrap().nanos, 123_456_789);

        assert_eq!(domain::User::from(wire), user);
    }

    #[test]
    fn absent_updated_at_stays_absent() {
        let user = domain_user(None);

        let wire = user_v1::User::from(user.clone());
        assert_eq!(wire.updated_at, None);

        let back = domain::User::from(wire);
        assert_eq!(back.updated_at, None);
        assert_eq!(back, user);
    }

    #[test]
    fn zero_created_at_becomes_absent_timestamp() {
        let user = domain::User {
            created_at: DateTime::<Utc>::default(),
            ..domain_user(None)
        };

        let wire = user_v1::User::from(user);

        assert_eq!(wire.created_at, None);
    }

    #[test]
    fn invalid_wire_timestamp_is_dropped() {
        let ts = user_v1::Timestamp {
            seconds: 10,
            nanos: -1,
        };
        assert_eq!(ts.to_datetime(), None);
    }

    #[test]
    fn fields_convert_both_ways() {
        let wire = user_v1::UserFields {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "x".into(),
            password_confirm: "x".into(),
            role: user_v1::Role::User,
        };

        let fields = domain::UserFields::from(wire.clone());
        assert_eq!(fields.role, domain::Role::User);
        assert!(fields.passwords_match());

        assert_eq!(user_v1::UserFields::from(fields), wire);
    }
}
