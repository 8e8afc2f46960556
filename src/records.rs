use crate::error::ClientError;
use crate::wire::{
    XmlInformationType, XmlMember, XmlOrganisation, XmlOrganisationChild, XmlOrganisationUnit,
    XmlRole,
};

// Clean records projected from the vendor XML. Constructed once per response
// parse, never mutated afterwards.

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InformationType {
    pub id: i32,
    pub name: String,
    pub organisation_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrganisationChildren {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrganisationUnit {
    pub id: i32,
    pub value: String,
    pub organisation_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Organisation {
    pub id: i32,
    pub name: String,
    pub roles: Vec<Role>,
    pub information_types: Vec<InformationType>,
    /// `None` when the vendor omits the group, not an empty list.
    pub children: Option<Vec<OrganisationChildren>>,
    pub organisation_units: Option<Vec<OrganisationUnit>>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ClientError> {
    value.ok_or_else(|| ClientError::MissingField(field.to_string()))
}

impl TryFrom<XmlRole> for Role {
    type Error = ClientError;

    fn try_from(xml: XmlRole) -> Result<Self, ClientError> {
        Ok(Role {
            id: required(xml.id, "Role/@Id")?,
            name: required(xml.name, "Role/@Name")?,
            description: xml.description,
        })
    }
}

impl TryFrom<XmlInformationType> for InformationType {
    type Error = ClientError;

    fn try_from(xml: XmlInformationType) -> Result<Self, ClientError> {
        Ok(InformationType {
            id: required(xml.id, "InformationType/@Id")?,
            name: required(xml.name, "InformationType/@Name")?,
            organisation_id: required(xml.organisation_id, "InformationType/@OrganisationId")?,
        })
    }
}

impl TryFrom<XmlOrganisationChild> for OrganisationChildren {
    type Error = ClientError;

    fn try_from(xml: XmlOrganisationChild) -> Result<Self, ClientError> {
        Ok(OrganisationChildren {
            id: required(xml.id, "CardskipperOrganisationChildren/@Id")?,
            name: required(xml.name, "CardskipperOrganisationChildren/@Name")?,
        })
    }
}

impl TryFrom<XmlOrganisationUnit> for OrganisationUnit {
    type Error = ClientError;

    fn try_from(xml: XmlOrganisationUnit) -> Result<Self, ClientError> {
        Ok(OrganisationUnit {
            id: required(xml.id, "OrganisationUnit/@Id")?,
            value: required(xml.value, "OrganisationUnit/@Value")?,
            organisation_id: required(xml.organisation_id, "OrganisationUnit/@OrganisationId")?,
        })
    }
}

impl TryFrom<XmlOrganisation> for Organisation {
    type Error = ClientError;

    fn try_from(xml: XmlOrganisation) -> Result<Self, ClientError> {
        let roles = required(xml.roles, "Organisation/Roles")?
            .role
            .into_iter()
            .map(Role::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let information_types = required(xml.information_types, "Organisation/InformationTypes")?
            .information_type
            .into_iter()
            .map(InformationType::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let children = xml
            .children
            .map(|group| {
                group
                    .child
                    .into_iter()
                    .map(OrganisationChildren::try_from)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let organisation_units = xml
            .organisation_units
            .map(|group| {
                group
                    .unit
                    .into_iter()
                    .map(OrganisationUnit::try_from)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Organisation {
            id: required(xml.id, "Organisation/@Id")?,
            name: required(xml.name, "Organisation/@Name")?,
            roles,
            information_types,
            children,
            organisation_units,
        })
    }
}

impl TryFrom<XmlMember> for Member {
    type Error = ClientError;

    fn try_from(xml: XmlMember) -> Result<Self, ClientError> {
        let contact_info = required(xml.contact_info, "Member/ContactInfo")?;
        Ok(Member {
            email: required(contact_info.email, "Member/ContactInfo/@EMail")?,
            first_name: required(xml.firstname, "Member/@Firstname")?,
            last_name: required(xml.lastname, "Member/@Lastname")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{XmlMemberExport, XmlOrganisationInfo};
    use quick_xml::de::from_str;

    const ORGANISATION_INFO_XML: &str = r#"
<Cardskipper>
  <Organisations>
    <Organisation Id="100" Name="Alpha Club">
      <Roles>
        <Role Id="1" Name="Member"/>
      </Roles>
      <InformationTypes>
        <InformationType Id="10" Name="News" OrganisationId="100"/>
      </InformationTypes>
    </Organisation>
    <Organisation Id="200" Name="Beta Club">
      <Roles>
        <Role Id="2" Name="Board" Description="Board of directors"/>
      </Roles>
      <InformationTypes>
        <InformationType Id="20" Name="Events" OrganisationId="200"/>
      </InformationTypes>
      <Children>
        <CardskipperOrganisationChildren Id="201" Name="Beta Youth"/>
      </Children>
      <OrganisationUnits>
        <OrganisationUnit Id="301" Value="North" OrganisationId="200"/>
      </OrganisationUnits>
    </Organisation>
  </Organisations>
</Cardskipper>
"#;

    fn parse_organisations(xml: &str) -> Result<Vec<Organisation>, ClientError> {
        let parsed: XmlOrganisationInfo = from_str(xml).expect("fixture must deserialize");
        parsed
            .organisations
            .organisation
            .into_iter()
            .map(Organisation::try_from)
            .collect()
    }

    #[test]
    fn test_organisations_map_in_vendor_order() {
        let organisations = parse_organisations(ORGANISATION_INFO_XML).unwrap();
        assert_eq!(organisations.len(), 2);

        assert_eq!(organisations[0].id, 100);
        assert_eq!(organisations[0].name, "Alpha Club");
        assert_eq!(organisations[1].id, 200);
        assert_eq!(organisations[1].name, "Beta Club");

        for organisation in &organisations {
            assert!(!organisation.roles.is_empty());
            assert!(!organisation.information_types.is_empty());
        }
    }

    #[test]
    fn test_absent_optional_groups_map_to_none() {
        let organisations = parse_organisations(ORGANISATION_INFO_XML).unwrap();

        // First organisation has no Children or OrganisationUnits group
        assert_eq!(organisations[0].children, None);
        assert_eq!(organisations[0].organisation_units, None);

        let children = organisations[1].children.as_ref().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, 201);
        assert_eq!(children[0].name, "Beta Youth");

        let units = organisations[1].organisation_units.as_ref().unwrap();
        assert_eq!(units[0].value, "North");
        assert_eq!(units[0].organisation_id, 200);
    }

    #[test]
    fn test_optional_role_description() {
        let organisations = parse_organisations(ORGANISATION_INFO_XML).unwrap();
        assert_eq!(organisations[0].roles[0].description, None);
        assert_eq!(
            organisations[1].roles[0].description.as_deref(),
            Some("Board of directors")
        );
    }

    #[test]
    fn test_missing_required_field_names_its_path() {
        let xml = r#"
<Cardskipper>
  <Organisations>
    <Organisation Name="No Id">
      <Roles><Role Id="1" Name="Member"/></Roles>
      <InformationTypes><InformationType Id="1" Name="News" OrganisationId="1"/></InformationTypes>
    </Organisation>
  </Organisations>
</Cardskipper>
"#;
        let error = parse_organisations(xml).unwrap_err();
        match error {
            ClientError::MissingField(field) => assert_eq!(field, "Organisation/@Id"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_member_projection() {
        let xml = r#"
<Cardskipper>
  <Members>
    <Member Firstname="Anna" Lastname="Svensson">
      <ContactInfo EMail="anna@example.com"/>
    </Member>
  </Members>
</Cardskipper>
"#;
        let parsed: XmlMemberExport = from_str(xml).unwrap();
        let members: Vec<Member> = parsed
            .members
            .unwrap()
            .member
            .into_iter()
            .map(Member::try_from)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(
            members,
            vec![Member {
                email: "anna@example.com".to_string(),
                first_name: "Anna".to_string(),
                last_name: "Svensson".to_string(),
            }]
        );
    }

    #[test]
    fn test_member_without_contact_info_fails() {
        let xml = r#"<Cardskipper><Members><Member Firstname="Anna" Lastname="Svensson"/></Members></Cardskipper>"#;
        let parsed: XmlMemberExport = from_str(xml).unwrap();
        let mut member = parsed.members.unwrap().member;
        let error = Member::try_from(member.remove(0));
        assert!(matches!(error, Err(ClientError::MissingField(ref f)) if f == "Member/ContactInfo"));
    }
}
