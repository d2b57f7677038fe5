// LedSlot - core/proof.rs
//
// Proof-of-service submission a driver completes after a run.
// Photos are stored as opaque references (file names or URIs); nothing is
// uploaded.

use crate::util::constants::{MAX_PROOF_PHOTOS, MIN_PROOF_PHOTOS};
use crate::util::error::FormError;

/// A photo the driver is asked to capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoRequirement {
    pub label: &'static str,
    pub required: bool,
}

/// Photo checklist in capture order.
pub const PHOTO_REQUIREMENTS: [PhotoRequirement; 3] = [
    PhotoRequirement {
        label: "Truck with LED screen visible",
        required: true,
    },
    PhotoRequirement {
        label: "Campaign content displayed",
        required: true,
    },
    PhotoRequirement {
        label: "Location landmark (optional)",
        required: false,
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProofOfService {
    photos: Vec<String>,
    gps_confirmed: bool,
    pub notes: String,
}

impl ProofOfService {
    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn add_photo(&mut self, photo: impl Into<String>) -> Result<(), FormError> {
        if self.photos.len() >= MAX_PROOF_PHOTOS {
            return Err(FormError::TooManyItems {
                field: "photos",
                max: MAX_PROOF_PHOTOS,
            });
        }
        self.photos.push(photo.into());
        Ok(())
    }

    /// Remove the photo at `index`. Out-of-range indices are ignored.
    pub fn remove_photo(&mut self, index: usize) -> Option<String> {
        (index < self.photos.len()).then(|| self.photos.remove(index))
    }

    pub fn confirm_gps(&mut self) {
        self.gps_confirmed = true;
    }

    pub fn gps_confirmed(&self) -> bool {
        self.gps_confirmed
    }

    /// Checklist with a satisfied flag per requirement. The n-th requirement
    /// counts as satisfied once n photos have been taken.
    pub fn requirements(&self) -> Vec<(PhotoRequirement, bool)> {
        PHOTO_REQUIREMENTS
            .iter()
            .enumerate()
            .map(|(i, req)| (*req, self.photos.len() > i))
            .collect()
    }

    pub fn can_submit(&self) -> bool {
        self.gps_confirmed && self.photos.len() >= MIN_PROOF_PHOTOS
    }
}
