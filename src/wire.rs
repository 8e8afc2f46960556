use serde::Deserialize;

// Wire structs mirroring the vendor's XML response shapes. Attributes use
// the `@` rename convention of quick-xml; required-ness is not enforced
// here but during projection into the clean records.

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlOrganisationInfo {
    #[serde(rename = "Organisations")]
    pub organisations: XmlOrganisations,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlOrganisations {
    #[serde(rename = "Organisation")]
    pub organisation: Vec<XmlOrganisation>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlOrganisation {
    #[serde(rename = "@Id")]
    pub id: Option<i32>,
    #[serde(rename = "@Name")]
    pub name: Option<String>,
    #[serde(rename = "Roles")]
    pub roles: Option<XmlRoles>,
    #[serde(rename = "InformationTypes")]
    pub information_types: Option<XmlInformationTypes>,
    #[serde(rename = "Children")]
    pub children: Option<XmlChildren>,
    #[serde(rename = "OrganisationUnits")]
    pub organisation_units: Option<XmlOrganisationUnits>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlRoles {
    #[serde(rename = "Role")]
    pub role: Vec<XmlRole>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlRole {
    #[serde(rename = "@Id")]
    pub id: Option<i32>,
    #[serde(rename = "@Name")]
    pub name: Option<String>,
    #[serde(rename = "@Description")]
    pub description: Option<String>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlInformationTypes {
    #[serde(rename = "InformationType")]
    pub information_type: Vec<XmlInformationType>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlInformationType {
    #[serde(rename = "@Id")]
    pub id: Option<i32>,
    #[serde(rename = "@Name")]
    pub name: Option<String>,
    #[serde(rename = "@OrganisationId")]
    pub organisation_id: Option<i32>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlChildren {
    #[serde(rename = "CardskipperOrganisationChildren")]
    pub child: Vec<XmlOrganisationChild>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlOrganisationChild {
    #[serde(rename = "@Id")]
    pub id: Option<i32>,
    #[serde(rename = "@Name")]
    pub name: Option<String>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlOrganisationUnits {
    #[serde(rename = "OrganisationUnit")]
    pub unit: Vec<XmlOrganisationUnit>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlOrganisationUnit {
    #[serde(rename = "@Id")]
    pub id: Option<i32>,
    #[serde(rename = "@Value")]
    pub value: Option<String>,
    #[serde(rename = "@OrganisationId")]
    pub organisation_id: Option<i32>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlMemberExport {
    #[serde(rename = "Members")]
    pub members: Option<XmlMembers>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlMembers {
    #[serde(rename = "Member")]
    pub member: Vec<XmlMember>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlMember {
    #[serde(rename = "@Firstname")]
    pub firstname: Option<String>,
    #[serde(rename = "@Lastname")]
    pub lastname: Option<String>,
    #[serde(rename = "ContactInfo")]
    pub contact_info: Option<XmlContactInfo>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlContactInfo {
    #[serde(rename = "@EMail")]
    pub email: Option<String>,
}
