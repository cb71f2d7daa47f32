//! Matching of free-text event locations to known buildings

use primitive_building::PrimitiveBuilding;

/// Short or informal names mapped onto the full building name they refer to
///
/// Checked in order, the first alias contained in a location wins
const ALIASES: &[(&str, &str)] = &[
	("shannon lib", "shannon library"),
	("clemons lib", "clemons library"),
	("brown lib", "brown science & engineering library"),
	("ohill", "o'hill dining hall"),
	("o hill", "o'hill dining hall"),
	("newcomb", "newcomb hall"),
	("rotunda", "the rotunda"),
	("lawn", "the lawn"),
	("old cabell", "old cabell hall"),
	("new cabell", "new cabell hall"),
	("rice", "rice hall"),
	("olsson", "olsson hall"),
	("thornton", "thornton hall"),
	("jpa", "john paul jones arena"),
	("jpj", "john paul jones arena"),
	("scott", "scott stadium"),
	("cobb", "cobb hall"),
	("rouss", "rouss-robertson hall (mcintire)"),
	("robertson", "rouss-robertson hall (mcintire)"),
	("physics", "physics building"),
	("chemistry", "chemistry building"),
	("meb", "mechanical engineering building"),
	("msb", "materials science building (msb)"),
];

/// Lower-case and trim a building name, resolving known aliases
pub fn normalize_building_name(name: &str) -> String {
	let name = name.trim().to_lowercase();

	ALIASES
		.iter()
		.find(|(alias, _)| name.contains(alias))
		.map_or(name, |(_, full)| (*full).to_string())
}

/// Find the building a location refers to
///
/// A building matches when either normalised name contains the other, the
/// shortest matching building name is the most specific one
pub fn match_building<'b>(
	location: &str,
	buildings: &'b [PrimitiveBuilding],
) -> Option<&'b PrimitiveBuilding> {
	let location = normalize_building_name(location);

	if location.is_empty() {
		return None;
	}

	buildings
		.iter()
		.map(|b| (b, normalize_building_name(&b.name)))
		.filter(|(_, name)| {
			name.contains(&location) || location.contains(name.as_str())
		})
		.min_by_key(|(_, name)| name.len())
		.map(|(b, _)| b)
}
