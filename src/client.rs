use quick_xml::de::from_str;
use tracing::debug;

use crate::criteria::MemberSearchCriteria;
use crate::environment::Environment;
use crate::error::ClientError;
use crate::records::{Member, Organisation};
use crate::schema::Schema;
use crate::transport::{Credentials, HttpTransport, Transport};
use crate::wire::{XmlMemberExport, XmlOrganisationInfo};

/// Client for the Cardskipper membership API. Holds nothing but the
/// transport; credentials and environment are passed on every call.
pub struct CardskipperClient<T = HttpTransport> {
    transport: T,
}

impl CardskipperClient<HttpTransport> {
    pub fn new() -> Self {
        Self {
            transport: HttpTransport::new(),
        }
    }
}

impl Default for CardskipperClient<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> CardskipperClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    fn fetch_schema(&self, base_url: &str, document: &str) -> Result<Schema, ClientError> {
        let url = format!("{base_url}/Doc/{document}");
        debug!(url = %url, "fetching vendor schema");
        let source = self.transport.get(&url, None)?;
        Schema::parse(&source)
    }

    /// Fetches every organisation visible to the credentials, in the order
    /// the vendor returns them. All-or-nothing: any transport, parse,
    /// schema or mapping failure fails the whole call.
    pub fn organisation_info(
        &self,
        credentials: &Credentials,
        environment: Environment,
    ) -> Result<Vec<Organisation>, ClientError> {
        let base_url = environment.base_url();
        let schema = self.fetch_schema(base_url, "OrganisationInfo.xsd")?;

        let url = format!("{base_url}/Organisation/Info");
        debug!(url = %url, "requesting organisation info");
        let body = self.transport.get(&url, Some(credentials))?;
        let xml =
            String::from_utf8(body).map_err(|e| ClientError::MalformedXml(e.to_string()))?;
        schema.validate(&xml)?;

        let parsed: XmlOrganisationInfo =
            from_str(&xml).map_err(|e| ClientError::MalformedXml(e.to_string()))?;
        parsed
            .organisations
            .organisation
            .into_iter()
            .map(Organisation::try_from)
            .collect()
    }

    /// Exports members matching the search criteria. The request document
    /// is validated against the vendor schema first; an invalid document
    /// fails the call and never reaches the network.
    pub fn member_export(
        &self,
        credentials: &Credentials,
        criteria: &MemberSearchCriteria,
        environment: Environment,
    ) -> Result<Vec<Member>, ClientError> {
        let base_url = environment.base_url();
        let criteria_schema = self.fetch_schema(base_url, "SearchCriteriaMember.xsd")?;

        let request = criteria.to_xml()?;
        criteria_schema.validate(&request)?;

        let url = format!("{base_url}/Member/Export");
        debug!(url = %url, organisation_id = %criteria.organisation_id, "exporting members");
        let body = self
            .transport
            .post(&url, Some(credentials), request.into_bytes())?;
        let xml =
            String::from_utf8(body).map_err(|e| ClientError::MalformedXml(e.to_string()))?;

        let member_schema = self.fetch_schema(base_url, "MemberImport.xsd")?;
        member_schema.validate(&xml)?;

        let parsed: XmlMemberExport =
            from_str(&xml).map_err(|e| ClientError::MalformedXml(e.to_string()))?;
        parsed
            .members
            .map(|members| members.member)
            .unwrap_or_default()
            .into_iter()
            .map(Member::try_from)
            .collect()
    }

    /// Country reference data. Not yet provided by this client.
    pub fn basedata_countries(
        &self,
        _credentials: &Credentials,
        _environment: Environment,
    ) -> Result<(), ClientError> {
        Err(ClientError::NotImplemented("Basedata/Country"))
    }

    /// Gender reference data. Not yet provided by this client.
    pub fn basedata_gender(
        &self,
        _credentials: &Credentials,
        _environment: Environment,
    ) -> Result<(), ClientError> {
        Err(ClientError::NotImplemented("Basedata/Gender"))
    }
}
