use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Role {
    Patient => "patient",
    Doctor => "doctor",
    LabTechnician => "lab_technician",
    Pharmacy => "pharmacy",
    Admin => "admin",
});

str_enum!(AppointmentStatus {
    Pending => "pending",
    Confirmed => "confirmed",
    Completed => "completed",
});

str_enum!(LabRequestStatus {
    Pending => "pending",
    Completed => "completed",
});

// Wire spellings fixed by the backend's test catalogue.
str_enum!(TestType {
    XRay => "X-Ray",
    Mri => "MRI",
    CtScan => "CT Scan",
    BloodTest => "Blood Test",
});

impl Role {
    /// All five roles, in registration-form order.
    pub const ALL: [Role; 5] = [
        Role::Patient,
        Role::Doctor,
        Role::LabTechnician,
        Role::Pharmacy,
        Role::Admin,
    ];

    /// Staff roles must attach a verification document at registration.
    pub fn requires_verification_document(&self) -> bool {
        match self {
            Role::Patient | Role::Admin => false,
            Role::Doctor | Role::LabTechnician | Role::Pharmacy => true,
        }
    }
}

impl TestType {
    /// The fixed catalogue offered in the consultation view.
    pub const ALL: [TestType; 4] = [
        TestType::XRay,
        TestType::Mri,
        TestType::CtScan,
        TestType::BloodTest,
    ];
}
