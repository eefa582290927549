//! Named default shapes per resource.

use crate::record::RecordType;

/// A shape string bound to the record type it is written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub model: RecordType,
    pub shape: &'static str,
}

pub const CONTRACTS_MINIMAL: Preset = Preset {
    name: "CONTRACTS_MINIMAL",
    model: RecordType::Contract,
    shape: "key,piid,award_date,recipient(display_name),description,total_contract_value",
};

pub const ENTITIES_MINIMAL: Preset = Preset {
    name: "ENTITIES_MINIMAL",
    model: RecordType::Entity,
    shape: "uei,legal_business_name,cage_code,business_types",
};

pub const ENTITIES_COMPREHENSIVE: Preset = Preset {
    name: "ENTITIES_COMPREHENSIVE",
    model: RecordType::Entity,
    shape: "uei,legal_business_name,dba_name,cage_code,business_types,primary_naics,naics_codes,\
            psc_codes,email_address,entity_url,description,capabilities,keywords,physical_address,\
            mailing_address,federal_obligations,congressional_district",
};

pub const FORECASTS_MINIMAL: Preset = Preset {
    name: "FORECASTS_MINIMAL",
    model: RecordType::Forecast,
    shape: "id,title,anticipated_award_date,fiscal_year,naics_code,status",
};

pub const OPPORTUNITIES_MINIMAL: Preset = Preset {
    name: "OPPORTUNITIES_MINIMAL",
    model: RecordType::Opportunity,
    shape: "opportunity_id,title,solicitation_number,response_deadline,active",
};

pub const NOTICES_MINIMAL: Preset = Preset {
    name: "NOTICES_MINIMAL",
    model: RecordType::Notice,
    shape: "notice_id,title,solicitation_number,posted_date",
};

pub const GRANTS_MINIMAL: Preset = Preset {
    name: "GRANTS_MINIMAL",
    model: RecordType::Grant,
    shape: "grant_id,opportunity_number,title,status(*),agency_code",
};

pub const IDVS_MINIMAL: Preset = Preset {
    name: "IDVS_MINIMAL",
    model: RecordType::Idv,
    shape: "key,piid,award_date,recipient(display_name,uei),description,total_contract_value,\
            obligated,idv_type",
};

pub const IDVS_COMPREHENSIVE: Preset = Preset {
    name: "IDVS_COMPREHENSIVE",
    model: RecordType::Idv,
    shape: "key,piid,award_date,description,fiscal_year,total_contract_value,\
            base_and_exercised_options_value,obligated,idv_type,multiple_or_single_award_idv,\
            type_of_idc,period_of_performance(start_date,last_date_to_order),\
            recipient(display_name,legal_business_name,uei,cage_code),awarding_office(*),\
            funding_office(*),place_of_performance(*),parent_award(key,piid),competition(*),\
            legislative_mandates(*),transactions(*),subawards_summary(*)",
};

pub const VEHICLES_MINIMAL: Preset = Preset {
    name: "VEHICLES_MINIMAL",
    model: RecordType::Vehicle,
    shape: "uuid,solicitation_identifier,organization_id,awardee_count,order_count,\
            vehicle_obligations,vehicle_contracts_value,solicitation_title,solicitation_date",
};

pub const VEHICLES_COMPREHENSIVE: Preset = Preset {
    name: "VEHICLES_COMPREHENSIVE",
    model: RecordType::Vehicle,
    shape: "uuid,solicitation_identifier,agency_id,organization_id,vehicle_type,who_can_use,\
            solicitation_title,solicitation_description,solicitation_date,naics_code,psc_code,\
            set_aside,fiscal_year,award_date,last_date_to_order,awardee_count,order_count,\
            vehicle_obligations,vehicle_contracts_value,type_of_idc,contract_type,\
            competition_details(*)",
};

/// Awardee rows of a vehicle are IDVs.
pub const VEHICLE_AWARDEES_MINIMAL: Preset = Preset {
    name: "VEHICLE_AWARDEES_MINIMAL",
    model: RecordType::Idv,
    shape: "uuid,key,piid,award_date,title,order_count,idv_obligations,idv_contracts_value,\
            recipient(display_name,uei)",
};

pub const ALL: &[Preset] = &[
    CONTRACTS_MINIMAL,
    ENTITIES_MINIMAL,
    ENTITIES_COMPREHENSIVE,
    FORECASTS_MINIMAL,
    OPPORTUNITIES_MINIMAL,
    NOTICES_MINIMAL,
    GRANTS_MINIMAL,
    IDVS_MINIMAL,
    IDVS_COMPREHENSIVE,
    VEHICLES_MINIMAL,
    VEHICLES_COMPREHENSIVE,
    VEHICLE_AWARDEES_MINIMAL,
];

/// Finds a preset by name, ignoring ASCII case.
pub fn find(name: &str) -> Option<&'static Preset> {
    ALL.iter().find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(find("grants_minimal"), Some(&GRANTS_MINIMAL));
        assert_eq!(find(" IDVS_MINIMAL "), Some(&IDVS_MINIMAL));
        assert_eq!(find("UNKNOWN"), None);
    }

    #[test]
    fn continuation_lines_leave_no_whitespace() {
        for preset in ALL {
            assert!(!preset.shape.contains(char::is_whitespace), "{}", preset.name);
        }
    }

    #[test]
    fn names_are_unique() {
        for (i, preset) in ALL.iter().enumerate() {
            assert!(ALL[i + 1..].iter().all(|other| other.name != preset.name));
        }
    }
}
