use serde::Serialize;
use serde_json::Value;
use shared::domain::Feature;

/// Optional host features the creative may query with `supports`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFeatures {
    pub sms: bool,
    pub tel: bool,
    pub calendar: bool,
    pub store_picture: bool,
    pub inline_video: bool,
    pub vpaid: bool,
    pub location: bool,
}

impl DeviceFeatures {
    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::Sms => self.sms,
            Feature::Tel => self.tel,
            Feature::Calendar => self.calendar,
            Feature::StorePicture => self.store_picture,
            Feature::InlineVideo => self.inline_video,
            Feature::Vpaid => self.vpaid,
            Feature::Location => self.location,
        }
    }

    fn slot(&mut self, feature: Feature) -> &mut bool {
        match feature {
            Feature::Sms => &mut self.sms,
            Feature::Tel => &mut self.tel,
            Feature::Calendar => &mut self.calendar,
            Feature::StorePicture => &mut self.store_picture,
            Feature::InlineVideo => &mut self.inline_video,
            Feature::Vpaid => &mut self.vpaid,
            Feature::Location => &mut self.location,
        }
    }

    /// Overwrites each flag whose candidate field is a boolean. Anything else,
    /// including a non-object candidate, is ignored field by field.
    pub fn update(&mut self, candidate: &Value) {
        for &feature in Feature::ALL {
            if let Some(flag) = candidate.get(feature.as_str()).and_then(Value::as_bool) {
                *self.slot(feature) = flag;
            }
        }
    }
}
