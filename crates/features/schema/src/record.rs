use prism_domain::schema::{FieldSchema, ModelSchema};
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Built-in record types.
///
/// The string form is the type name used in catalogs, error messages and `nestedModel`
/// references.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum RecordType {
    // Resources
    Contract,
    #[strum(to_string = "IDV")]
    Idv,
    Entity,
    Forecast,
    Grant,
    Notice,
    Opportunity,
    Vehicle,

    // Nested records
    RecipientProfile,
    Location,
    Agency,
    Department,
    Office,
    PeriodOfPerformance,
    ParentAward,
    Competition,
    CompetitionDetails,
    LegislativeMandates,
    Transaction,
    SubawardsSummary,
    CodeDescription,
}

impl RecordType {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Top-level resources a caller projects directly, as opposed to nested records.
    pub const fn is_resource(self) -> bool {
        matches!(
            self,
            Self::Contract
                | Self::Idv
                | Self::Entity
                | Self::Forecast
                | Self::Grant
                | Self::Notice
                | Self::Opportunity
                | Self::Vehicle
        )
    }

    pub fn schema(self) -> ModelSchema {
        ModelSchema::new(self.name(), self.declarations().iter().map(Decl::to_schema))
    }

    const fn declarations(self) -> &'static [Decl] {
        match self {
            Self::Contract => CONTRACT,
            Self::Idv => IDV,
            Self::Entity => ENTITY,
            Self::Forecast => FORECAST,
            Self::Grant => GRANT,
            Self::Notice => NOTICE,
            Self::Opportunity => OPPORTUNITY,
            Self::Vehicle => VEHICLE,
            Self::RecipientProfile => RECIPIENT_PROFILE,
            Self::Location => LOCATION,
            Self::Agency => AGENCY,
            Self::Department => DEPARTMENT,
            Self::Office => OFFICE,
            Self::PeriodOfPerformance => PERIOD_OF_PERFORMANCE,
            Self::ParentAward => PARENT_AWARD,
            Self::Competition => COMPETITION,
            Self::CompetitionDetails => COMPETITION_DETAILS,
            Self::LegislativeMandates => LEGISLATIVE_MANDATES,
            Self::Transaction => TRANSACTION,
            Self::SubawardsSummary => SUBAWARDS_SUMMARY,
            Self::CodeDescription => CODE_DESCRIPTION,
        }
    }
}

/// One row of a static field table.
#[derive(Debug, Clone, Copy)]
struct Decl {
    name: &'static str,
    ty: &'static str,
    required: bool,
    list: bool,
    nested: Option<&'static str>,
}

impl Decl {
    fn to_schema(&self) -> FieldSchema {
        let field = FieldSchema::new(self.name, self.ty).optional(!self.required).list(self.list);
        match self.nested {
            Some(model) => field.nested_model(model),
            None => field,
        }
    }
}

/// Optional scalar.
const fn opt(name: &'static str, ty: &'static str) -> Decl {
    Decl { name, ty, required: false, list: false, nested: None }
}

/// Required scalar (record identifiers).
const fn req(name: &'static str, ty: &'static str) -> Decl {
    Decl { name, ty, required: true, list: false, nested: None }
}

/// Optional list.
const fn many(name: &'static str, ty: &'static str) -> Decl {
    Decl { name, ty, required: false, list: true, nested: None }
}

/// Untyped map that still supports nested selection against `model`.
const fn via(name: &'static str, model: &'static str) -> Decl {
    Decl { name, ty: "dict", required: false, list: false, nested: Some(model) }
}

const CONTRACT: &[Decl] = &[
    req("key", "str"),
    req("piid", "str"),
    opt("award_date", "date"),
    opt("description", "str"),
    opt("fiscal_year", "int"),
    opt("total_contract_value", "Decimal"),
    opt("base_and_exercised_options_value", "Decimal"),
    opt("obligated", "Decimal"),
    opt("naics_code", "str"),
    opt("psc_code", "str"),
    opt("set_aside", "str"),
    opt("recipient", "RecipientProfile"),
    opt("awarding_agency", "Agency"),
    opt("funding_agency", "Agency"),
    opt("awarding_office", "Office"),
    opt("funding_office", "Office"),
    opt("place_of_performance", "Location"),
    opt("period_of_performance", "PeriodOfPerformance"),
    opt("parent_award", "ParentAward"),
    opt("competition", "Competition"),
    opt("legislative_mandates", "LegislativeMandates"),
    many("transactions", "Transaction"),
    opt("subawards_summary", "SubawardsSummary"),
];

const IDV: &[Decl] = &[
    req("key", "str"),
    req("piid", "str"),
    opt("uuid", "str"),
    opt("award_date", "date"),
    opt("title", "str"),
    opt("description", "str"),
    opt("fiscal_year", "int"),
    opt("total_contract_value", "Decimal"),
    opt("base_and_exercised_options_value", "Decimal"),
    opt("obligated", "Decimal"),
    opt("idv_type", "dict"),
    opt("multiple_or_single_award_idv", "dict"),
    opt("type_of_idc", "dict"),
    opt("order_count", "int"),
    opt("idv_obligations", "Decimal"),
    opt("idv_contracts_value", "Decimal"),
    opt("recipient", "RecipientProfile"),
    opt("awarding_agency", "Agency"),
    opt("funding_agency", "Agency"),
    opt("awarding_office", "Office"),
    opt("funding_office", "Office"),
    opt("place_of_performance", "Location"),
    opt("period_of_performance", "PeriodOfPerformance"),
    opt("parent_award", "ParentAward"),
    opt("competition", "Competition"),
    opt("legislative_mandates", "LegislativeMandates"),
    many("transactions", "Transaction"),
    opt("subawards_summary", "SubawardsSummary"),
];

const ENTITY: &[Decl] = &[
    req("uei", "str"),
    opt("display_name", "str"),
    opt("legal_business_name", "str"),
    opt("dba_name", "str"),
    opt("cage_code", "str"),
    many("business_types", "str"),
    opt("primary_naics", "str"),
    many("naics_codes", "str"),
    many("psc_codes", "str"),
    opt("email_address", "str"),
    opt("entity_url", "str"),
    opt("description", "str"),
    opt("capabilities", "str"),
    many("keywords", "str"),
    opt("physical_address", "Location"),
    opt("mailing_address", "Location"),
    opt("federal_obligations", "dict"),
    opt("congressional_district", "str"),
];

const FORECAST: &[Decl] = &[
    req("id", "int"),
    opt("title", "str"),
    opt("description", "str"),
    opt("anticipated_award_date", "date"),
    opt("fiscal_year", "int"),
    opt("naics_code", "str"),
    opt("status", "str"),
    opt("is_active", "bool"),
    opt("agency", "str"),
];

const GRANT: &[Decl] = &[
    req("grant_id", "int"),
    opt("opportunity_number", "str"),
    opt("title", "str"),
    opt("agency_code", "str"),
    opt("status", "CodeDescription"),
    opt("description", "str"),
    many("applicant_types", "CodeDescription"),
    many("funding_categories", "CodeDescription"),
    opt("last_updated", "datetime"),
];

const NOTICE: &[Decl] = &[
    req("notice_id", "str"),
    opt("title", "str"),
    opt("solicitation_number", "str"),
    opt("description", "str"),
    opt("posted_date", "datetime"),
    opt("response_deadline", "datetime"),
    opt("naics_code", "str"),
];

const OPPORTUNITY: &[Decl] = &[
    req("opportunity_id", "str"),
    opt("title", "str"),
    opt("solicitation_number", "str"),
    opt("description", "str"),
    opt("first_notice_date", "datetime"),
    opt("response_deadline", "datetime"),
    opt("active", "bool"),
    opt("naics_code", "str"),
    opt("psc_code", "str"),
];

const VEHICLE: &[Decl] = &[
    req("uuid", "str"),
    req("solicitation_identifier", "str"),
    opt("agency_id", "str"),
    opt("organization_id", "str"),
    opt("vehicle_type", "dict"),
    opt("who_can_use", "dict"),
    opt("type_of_idc", "dict"),
    opt("contract_type", "dict"),
    opt("agency_details", "dict"),
    many("descriptions", "str"),
    opt("fiscal_year", "int"),
    opt("solicitation_title", "str"),
    opt("solicitation_description", "str"),
    opt("solicitation_date", "date"),
    opt("naics_code", "int"),
    opt("psc_code", "str"),
    opt("set_aside", "str"),
    opt("award_date", "date"),
    opt("last_date_to_order", "date"),
    opt("awardee_count", "int"),
    opt("order_count", "int"),
    opt("vehicle_obligations", "Decimal"),
    opt("vehicle_contracts_value", "Decimal"),
    via("competition_details", "CompetitionDetails"),
];

const RECIPIENT_PROFILE: &[Decl] = &[
    opt("uei", "str"),
    opt("cage_code", "str"),
    opt("display_name", "str"),
    opt("legal_business_name", "str"),
    opt("parent_uei", "str"),
    opt("parent_name", "str"),
    many("business_types", "str"),
    opt("location", "Location"),
];

const LOCATION: &[Decl] = &[
    opt("address_line1", "str"),
    opt("address_line2", "str"),
    opt("city", "str"),
    opt("state", "str"),
    opt("state_code", "str"),
    opt("zip_code", "str"),
    opt("zip", "str"),
    opt("zip4", "str"),
    opt("country", "str"),
    opt("country_code", "str"),
    opt("county", "str"),
    opt("congressional_district", "str"),
    opt("latitude", "float"),
    opt("longitude", "float"),
];

const AGENCY: &[Decl] = &[
    opt("code", "str"),
    opt("name", "str"),
    opt("abbreviation", "str"),
    opt("department", "Department"),
];

const DEPARTMENT: &[Decl] = &[opt("code", "str"), opt("name", "str"), opt("abbreviation", "str")];

const OFFICE: &[Decl] = &[
    opt("office_code", "str"),
    opt("office_name", "str"),
    opt("agency_code", "str"),
    opt("agency_name", "str"),
    opt("department_code", "str"),
    opt("department_name", "str"),
];

const PERIOD_OF_PERFORMANCE: &[Decl] = &[
    opt("start_date", "date"),
    opt("current_end_date", "date"),
    opt("ultimate_completion_date", "date"),
    opt("last_date_to_order", "date"),
];

const PARENT_AWARD: &[Decl] = &[opt("key", "str"), opt("piid", "str")];

const COMPETITION: &[Decl] = &[
    opt("extent_competed", "dict"),
    opt("solicitation_procedures", "dict"),
    opt("number_of_offers_received", "int"),
    opt("set_aside", "dict"),
    opt("other_than_full_and_open_competition", "dict"),
];

const COMPETITION_DETAILS: &[Decl] = &[
    opt("extent_competed", "dict"),
    opt("solicitation_procedures", "dict"),
    opt("number_of_offers_received", "int"),
    opt("commercial_item_acquisition_procedures", "dict"),
    opt("solicitation_date", "date"),
];

const LEGISLATIVE_MANDATES: &[Decl] = &[
    opt("clinger_cohen_act_planning", "bool"),
    opt("construction_wage_rate_requirements", "bool"),
    opt("labor_standards", "bool"),
    opt("materials_supplies_articles_equipment", "bool"),
    opt("employment_eligibility_verification", "str"),
    opt("other_statutory_authority", "str"),
];

const TRANSACTION: &[Decl] = &[
    opt("modification_number", "str"),
    opt("transaction_date", "date"),
    opt("obligated", "Decimal"),
    opt("description", "str"),
    opt("action_type", "dict"),
];

const SUBAWARDS_SUMMARY: &[Decl] = &[opt("count", "int"), opt("total_amount", "Decimal")];

const CODE_DESCRIPTION: &[Decl] = &[opt("code", "str"), opt("description", "str")];

#[cfg(test)]
mod tests {
    use super::*;
    use prism_domain::schema::LogicalType;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn names_round_trip() {
        for ty in RecordType::iter() {
            assert_eq!(ty.name().parse::<RecordType>().unwrap(), ty);
            assert_eq!(ty.to_string(), ty.name());
        }
        assert_eq!(RecordType::Idv.name(), "IDV");
        assert!("Widget".parse::<RecordType>().is_err());
    }

    #[test]
    fn tables_have_no_duplicate_fields() {
        for ty in RecordType::iter() {
            assert_eq!(ty.schema().len(), ty.declarations().len(), "{ty} repeats a field");
        }
    }

    #[test]
    fn resources_and_nested_records_partition_catalog() {
        let resources = RecordType::iter().filter(|ty| ty.is_resource()).count();
        assert_eq!(resources, 8);
        assert!(RecordType::COUNT > resources);
    }

    #[test]
    fn explicit_nested_model_on_untyped_map() {
        let vehicle = RecordType::Vehicle.schema();
        let details = vehicle.field("competition_details").unwrap();
        assert_eq!(details.ty, LogicalType::Dict);
        assert_eq!(details.nested_model_name(), Some("CompetitionDetails"));

        let transactions = RecordType::Contract.schema();
        let transactions = transactions.field("transactions").unwrap();
        assert!(transactions.is_list);
        assert_eq!(transactions.nested_model_name(), Some("Transaction"));
    }
}
