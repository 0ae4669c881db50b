//! Closed attribute vocabulary shared by Profile and Preference records.
//!
//! Every tagged attribute on a profile is either a vocabulary value or the
//! `not_mentioned` sentinel. The filter treats `not_mentioned` as wildcard
//! permissive rather than as a value a preference can exclude on.

use serde::{Deserialize, Serialize};

macro_rules! closed_vocabulary {
    ($name:ident { $($variant:ident),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)+
            NotMentioned,
        }

        impl Default for $name {
            fn default() -> Self {
                $name::NotMentioned
            }
        }

        impl $name {
            pub fn is_mentioned(&self) -> bool {
                !matches!(self, $name::NotMentioned)
            }
        }
    };
}

closed_vocabulary!(Community {
    Ezhava,
    Nair,
    SyrianChristian,
    LatinCatholic,
    Muslim,
    Brahmin,
    Christian,
    Other,
});

closed_vocabulary!(MaritalStatus {
    NeverMarried,
    Divorced,
    Widowed,
    AwaitingDivorce,
});

closed_vocabulary!(Profession {
    SoftwareProfessional,
    Doctor,
    Engineer,
    Teacher,
    Nurse,
    GovernmentEmployee,
    BusinessOwner,
    Homemaker,
    Student,
    Other,
});

closed_vocabulary!(ProfessionType {
    Government,
    Private,
    Business,
    SelfEmployed,
    NotWorking,
    Student,
});

closed_vocabulary!(EducationLevel {
    HighSchool,
    Diploma,
    Bachelors,
    Masters,
    Doctorate,
    Professional,
});

closed_vocabulary!(HomeDistrict {
    Thiruvananthapuram,
    Kollam,
    Pathanamthitta,
    Alappuzha,
    Kottayam,
    Idukki,
    Ernakulam,
    Thrissur,
    Palakkad,
    Malappuram,
    Kozhikode,
    Wayanad,
    Kannur,
    Kasaragod,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_mentioned_is_default_and_unmentioned() {
        assert_eq!(Community::default(), Community::NotMentioned);
        assert!(!Community::NotMentioned.is_mentioned());
        assert!(Community::Nair.is_mentioned());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&MaritalStatus::NeverMarried).unwrap();
        assert_eq!(json, "\"never_married\"");
        let json = serde_json::to_string(&MaritalStatus::NotMentioned).unwrap();
        assert_eq!(json, "\"not_mentioned\"");
    }

    #[test]
    fn round_trips_through_json() {
        let value = HomeDistrict::Ernakulam;
        let json = serde_json::to_string(&value).unwrap();
        let back: HomeDistrict = serde_json::from_str(&json).unwrap();
        assert_eq!(value, back);
    }
}
