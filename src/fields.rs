//! ADIF field names and structural markers.
//!
//! # Markers
//!
//! | Marker | Meaning |
//! |--------|---------|
//! | `<eoh>` | End of header, only meaningful before the first record |
//! | `<eor>` | End of record |
//! | `<app_lotw_eof>` | Non-standard trailer appended by Logbook of the World |
//! | `//` | Comment up to the end of the line (inside record bodies) |
//!
//! All markers match case-insensitively.
//!
//! # Canonical order
//!
//! [`STANDARD_FIELDS`] lists the QSO fields of ADIF 3.1 in the order of the
//! format's field table. Canonical serialization emits present standard fields
//! in this order, followed by every other field sorted by name.

pub const EOH: &[u8] = b"<eoh>";
pub const EOR: &[u8] = b"<eor>";
pub const LOTW_EOF: &[u8] = b"<app_lotw_eof>";
pub const ADIF_VER: &[u8] = b"<adif_ver:";
pub const COMMENT: &[u8] = b"//";

/// Fields whose values identify a contact, in digest order.
pub const FINGERPRINT_FIELDS: [&str; 8] = [
    "call",
    "station_callsign",
    "band",
    "freq",
    "mode",
    "qso_date",
    "time_on",
    "time_off",
];

pub const STANDARD_FIELDS: &[&str] = &[
    "address",
    "address_intl",
    "age",
    "altitude",
    "a_index",
    "ant_az",
    "ant_el",
    "ant_path",
    "arrl_sect",
    "award_submitted",
    "award_granted",
    "band",
    "band_rx",
    "call",
    "check",
    "class",
    "clublog_qso_upload_date",
    "clublog_qso_upload_status",
    "cnty",
    "comment",
    "comment_intl",
    "cont",
    "contacted_op",
    "contest_id",
    "country",
    "country_intl",
    "cqz",
    "credit_submitted",
    "credit_granted",
    "darc_dok",
    "distance",
    "dxcc",
    "email",
    "eq_call",
    "eqsl_qslrdate",
    "eqsl_qslsdate",
    "eqsl_qsl_rcvd",
    "eqsl_qsl_sent",
    "fists",
    "fists_cc",
    "force_init",
    "freq",
    "freq_rx",
    "gridsquare",
    "gridsquare_ext",
    "guest_op",
    "hamlogeu_qso_upload_date",
    "hamlogeu_qso_upload_status",
    "hamqth_qso_upload_date",
    "hamqth_qso_upload_status",
    "hrdlog_qso_upload_date",
    "hrdlog_qso_upload_status",
    "iota",
    "iota_island_id",
    "ituz",
    "k_index",
    "lat",
    "lon",
    "lotw_qslrdate",
    "lotw_qslsdate",
    "lotw_qsl_rcvd",
    "lotw_qsl_sent",
    "max_bursts",
    "mode",
    "ms_shower",
    "my_altitude",
    "my_antenna",
    "my_antenna_intl",
    "my_arrl_sect",
    "my_city",
    "my_city_intl",
    "my_cnty",
    "my_country",
    "my_country_intl",
    "my_cq_zone",
    "my_dxcc",
    "my_fists",
    "my_gridsquare",
    "my_gridsquare_ext",
    "my_iota",
    "my_iota_island_id",
    "my_itu_zone",
    "my_lat",
    "my_lon",
    "my_name",
    "my_name_intl",
    "my_postal_code",
    "my_postal_code_intl",
    "my_pota_ref",
    "my_rig",
    "my_rig_intl",
    "my_sig",
    "my_sig_intl",
    "my_sig_info",
    "my_sig_info_intl",
    "my_sota_ref",
    "my_state",
    "my_street",
    "my_street_intl",
    "my_usaca_counties",
    "my_vucc_grids",
    "my_wwff_ref",
    "name",
    "name_intl",
    "notes",
    "notes_intl",
    "nr_bursts",
    "nr_pings",
    "operator",
    "owner_callsign",
    "pfx",
    "pota_ref",
    "precedence",
    "prop_mode",
    "public_key",
    "qrzcom_qso_upload_date",
    "qrzcom_qso_upload_status",
    "qslmsg",
    "qslmsg_intl",
    "qslrdate",
    "qslsdate",
    "qsl_rcvd",
    "qsl_rcvd_via",
    "qsl_sent",
    "qsl_sent_via",
    "qsl_via",
    "qso_complete",
    "qso_date",
    "qso_date_off",
    "qso_random",
    "qth",
    "qth_intl",
    "region",
    "rig",
    "rig_intl",
    "rst_rcvd",
    "rst_sent",
    "rx_pwr",
    "sat_mode",
    "sat_name",
    "sfi",
    "sig",
    "sig_intl",
    "sig_info",
    "sig_info_intl",
    "silent_key",
    "skcc",
    "sota_ref",
    "srx",
    "srx_string",
    "state",
    "station_callsign",
    "stx",
    "stx_string",
    "submode",
    "swl",
    "ten_ten",
    "time_off",
    "time_on",
    "tx_pwr",
    "uksmg",
    "usaca_counties",
    "ve_prov",
    "vucc_grids",
    "web",
    "wwff_ref",
];

/// Returns `true` if `name` (lowercase) is one of [`STANDARD_FIELDS`].
#[must_use]
pub fn is_standard_field(name: &str) -> bool {
    STANDARD_FIELDS.contains(&name)
}
