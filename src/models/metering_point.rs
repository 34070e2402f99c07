//! Metering point master data.

// self
use crate::_prelude::*;

/// Master data shared by every metering point listing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterData {
	/// 18-digit GSRN identifier.
	pub metering_point_id: String,
	/// Metering point type code (`E17` consumption, `E18` production, ...).
	#[serde(rename = "typeOfMP")]
	pub type_of_mp: Option<String>,
	/// Current balance supplier.
	pub balance_supplier_name: Option<String>,
	/// Street code.
	pub street_code: Option<String>,
	/// Street name.
	pub street_name: Option<String>,
	/// Building number.
	pub building_number: Option<String>,
	/// Floor.
	pub floor_id: Option<String>,
	/// Room.
	pub room_id: Option<String>,
	/// Postcode.
	pub postcode: Option<String>,
	/// City.
	pub city_name: Option<String>,
	/// City subdivision.
	pub city_sub_division_name: Option<String>,
	/// Municipality code.
	pub municipality_code: Option<String>,
	/// CVR of the consumer, for businesses.
	#[serde(rename = "consumerCVR")]
	pub consumer_cvr: Option<String>,
	/// CVR with data access.
	#[serde(rename = "dataAccessCVR")]
	pub data_access_cvr: Option<String>,
	/// Child metering points attached to this one.
	#[serde(default, deserialize_with = "crate::models::null_as_default")]
	pub child_metering_points: Vec<ChildMeteringPoint>,
	/// Free-text location description.
	pub location_description: Option<String>,
	/// Reading occurrence (`PT1H`, `PT15M`, ...).
	pub meter_reading_occurrence: Option<String>,
	/// Settlement method code.
	pub settlement_method: Option<String>,
	/// First consumer name.
	pub first_consumer_party_name: Option<String>,
	/// Second consumer name.
	pub second_consumer_party_name: Option<String>,
	/// Physical meter number.
	pub meter_number: Option<String>,
	/// Start of the current consumer relation.
	pub consumer_start_date: Option<String>,
}

/// Child metering point nested under a parent.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildMeteringPoint {
	/// Parent GSRN.
	pub parent_metering_point_id: Option<String>,
	/// Child GSRN.
	pub metering_point_id: Option<String>,
	/// Metering point type code.
	#[serde(rename = "typeOfMP")]
	pub type_of_mp: Option<String>,
	/// Reading occurrence.
	pub meter_reading_occurrence: Option<String>,
	/// Physical meter number.
	pub meter_number: Option<String>,
}

/// Metering point as listed on the customer surface.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeteringPoint {
	/// Master data.
	#[serde(flatten)]
	pub master_data: MasterData,
	/// `true` when the caller already holds a relation to the point.
	#[serde(default)]
	pub has_relation: bool,
}

/// Metering point as listed on the third-party surface.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeteringPointThirdParty {
	/// Master data.
	#[serde(flatten)]
	pub master_data: MasterData,
	/// Start of the granted access window.
	pub access_from: Option<String>,
	/// End of the granted access window.
	pub access_to: Option<String>,
}

/// Contact address attached to metering point details.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAddress {
	/// Primary contact name.
	#[serde(rename = "contactName1")]
	pub contact_name_1: Option<String>,
	/// Secondary contact name.
	#[serde(rename = "contactName2")]
	pub contact_name_2: Option<String>,
	/// `D01` technical or `D04` juridical address.
	pub address_code: Option<String>,
	/// Street name.
	pub street_name: Option<String>,
	/// Building number.
	pub building_number: Option<String>,
	/// Floor.
	pub floor_id: Option<String>,
	/// Room.
	pub room_id: Option<String>,
	/// City subdivision.
	pub city_sub_division_name: Option<String>,
	/// Postcode.
	pub postcode: Option<String>,
	/// City.
	pub city_name: Option<String>,
	/// Country.
	pub country_name: Option<String>,
	/// Phone number.
	pub contact_phone_number: Option<String>,
	/// Mobile number.
	pub contact_mobile_number: Option<String>,
	/// E-mail address.
	pub contact_email_address: Option<String>,
	/// Attention line.
	pub attention: Option<String>,
	/// Post box.
	pub post_box: Option<String>,
	/// Protected address marker.
	pub protected_address: Option<String>,
}

/// Full metering point details returned by the `getdetails` endpoints.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeteringPointDetail {
	/// Master data.
	#[serde(flatten)]
	pub master_data: MasterData,
	/// Parent GSRN for child points.
	pub parent_metering_point_id: Option<String>,
	/// Grid operator.
	pub grid_operator_name: Option<String>,
	/// Grid operator GLN.
	#[serde(rename = "gridOperatorID")]
	pub grid_operator_id: Option<String>,
	/// Agency scheme of the grid operator id.
	#[serde(rename = "gridOperatorID_SchemeAgencyIdentifier")]
	pub grid_operator_id_scheme_agency_identifier: Option<String>,
	/// Production obligation.
	pub production_obligation: Option<String>,
	/// Capacity.
	pub mp_capacity: Option<String>,
	/// Connection type.
	pub mp_connection_type: Option<String>,
	/// Disconnection type.
	pub disconnection_type: Option<String>,
	/// Product code.
	pub product: Option<String>,
	/// Asset type.
	pub asset_type: Option<String>,
	/// Unit of the energy time series.
	pub energy_time_series_measure_unit: Option<String>,
	/// Estimated annual volume.
	pub estimated_annual_volume: Option<String>,
	/// Grid area.
	pub metering_grid_area_identification: Option<String>,
	/// Net settlement group.
	pub net_settlement_group: Option<String>,
	/// Physical status.
	#[serde(rename = "physicalStatusOfMP")]
	pub physical_status_of_mp: Option<String>,
	/// Consumer category.
	pub consumer_category: Option<String>,
	/// Power limit in kW, as sent.
	#[serde(rename = "powerLimitKW")]
	pub power_limit_kw: Option<String>,
	/// Power limit in kW, numeric.
	#[serde(rename = "powerLimitKWDecimal")]
	pub power_limit_kw_decimal: Option<f64>,
	/// Power limit in ampere.
	#[serde(rename = "powerLimitA")]
	pub power_limit_a: Option<String>,
	/// Metering point subtype.
	#[serde(rename = "subTypeOfMP")]
	pub sub_type_of_mp: Option<String>,
	/// Address wash instructions.
	pub mp_address_wash_instructions: Option<String>,
	/// DAR address reference.
	pub dar_reference: Option<String>,
	/// Contact addresses.
	#[serde(default, deserialize_with = "crate::models::null_as_default")]
	pub contact_addresses: Vec<ContactAddress>,
	/// Balance supplier GLN.
	pub balance_supplier_id: Option<String>,
	/// Agency scheme of the balance supplier id.
	#[serde(rename = "balanceSupplierId_SchemeAgencyIdentifier")]
	pub balance_supplier_id_scheme_agency_identifier: Option<String>,
	/// Start of the current supply.
	pub balance_supplier_start_date: Option<String>,
	/// Protected name marker.
	pub protected_name: Option<String>,
	/// Customer-facing alias.
	pub metering_point_alias: Option<String>,
	/// Reading characteristics.
	pub mp_reading_characteristics: Option<String>,
	/// Meter counter digits.
	pub meter_counter_digits: Option<String>,
	/// Meter counter multiply factor.
	pub meter_counter_multiply_factor: Option<String>,
	/// Meter counter unit.
	pub meter_counter_unit: Option<String>,
	/// Meter counter type.
	pub meter_counter_type: Option<String>,
	/// Relation type.
	pub mp_relation_type: Option<String>,
	/// Occurrence.
	pub occurrence: Option<String>,
	/// Tax reduction marker.
	pub tax_reduction: Option<String>,
	/// Tax settlement date.
	pub tax_settlement_date: Option<String>,
}
