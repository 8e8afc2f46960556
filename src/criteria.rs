use chrono::{NaiveDate, NaiveDateTime};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::error::ClientError;
use crate::scalar::Scalar;

pub const ROOT_ELEMENT: &str = "Cardskipper";
pub const CRITERIA_ELEMENT: &str = "SearchCriteriaMember";

// Optional filters for a member export query. Only criteria carrying a
// truthy value end up in the request document.
#[derive(Debug, Clone, Default)]
pub struct MemberSearchCriteria {
    pub organisation_id: String,
    pub member_id: Option<i64>,
    pub role_id: Option<i64>,
    pub user_id: Option<i64>,
    pub organisation_member_id: Option<i64>,
    pub birthdate: Option<NaiveDate>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub cellphone: Option<String>,
    pub tag_contains: Option<String>,
    pub organisation_unit: Option<String>,
    pub has_user_device: Option<bool>,
    pub only_active: Option<bool>,
    pub changed_at: Option<NaiveDateTime>,
}

impl MemberSearchCriteria {
    pub fn new(organisation_id: impl Into<String>) -> Self {
        Self {
            organisation_id: organisation_id.into(),
            ..Self::default()
        }
    }

    /// Populated criteria in the element order the vendor schema declares.
    fn entries(&self) -> Vec<(&'static str, Scalar)> {
        let all = [
            ("MemberId", self.member_id.map(Scalar::Int)),
            (
                "OrganisationId",
                Some(Scalar::Text(self.organisation_id.clone())),
            ),
            ("RoleId", self.role_id.map(Scalar::Int)),
            ("UserId", self.user_id.map(Scalar::Int)),
            (
                "OrganisationMemberId",
                self.organisation_member_id.map(Scalar::Int),
            ),
            ("Birthdate", self.birthdate.map(Scalar::Date)),
            ("Firstname", self.first_name.clone().map(Scalar::Text)),
            ("Lastname", self.last_name.clone().map(Scalar::Text)),
            ("Cellphone", self.cellphone.clone().map(Scalar::Text)),
            ("TagContains", self.tag_contains.clone().map(Scalar::Text)),
            (
                "OrganisationUnit",
                self.organisation_unit.clone().map(Scalar::Text),
            ),
            ("HasUserDevice", self.has_user_device.map(Scalar::Bool)),
            ("OnlyActive", self.only_active.map(Scalar::Bool)),
            ("ChangedAt", self.changed_at.map(Scalar::DateTime)),
        ];

        all.into_iter()
            .filter_map(|(tag, value)| value.filter(Scalar::is_truthy).map(|value| (tag, value)))
            .collect()
    }

    /// Builds the search document: one empty child element per populated
    /// criterion, the value carried in a `value` attribute.
    pub fn to_xml(&self) -> Result<String, ClientError> {
        let mut writer = Writer::new(Vec::new());

        writer
            .write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))
            .map_err(|e| ClientError::MalformedXml(e.to_string()))?;
        writer
            .write_event(Event::Start(BytesStart::new(CRITERIA_ELEMENT)))
            .map_err(|e| ClientError::MalformedXml(e.to_string()))?;

        for (tag, value) in self.entries() {
            let mut element = BytesStart::new(tag);
            element.push_attribute(("value", value.to_xsd().as_str()));
            writer
                .write_event(Event::Empty(element))
                .map_err(|e| ClientError::MalformedXml(e.to_string()))?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(CRITERIA_ELEMENT)))
            .map_err(|e| ClientError::MalformedXml(e.to_string()))?;
        writer
            .write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))
            .map_err(|e| ClientError::MalformedXml(e.to_string()))?;

        String::from_utf8(writer.into_inner()).map_err(|e| ClientError::MalformedXml(e.to_string()))
    }
}
