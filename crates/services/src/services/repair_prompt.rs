//! Targeted instruction appended to the user message for the single repair attempt.

use domain::models::market::Market;

/// Requirement line for a missing section, picked by substring on its lowercased name.
/// Rules are checked in order; the first hit wins.
pub fn section_requirement(section: &str, market: Market) -> Option<&'static str> {
    let name = section.to_lowercase();
    let has = |needle: &str| name.contains(needle);

    let requirement = if has("navbar") {
        "- NAVBAR: Sticky header with logo, navigation links, and CTA button"
    } else if has("hero") {
        match market {
            Market::Domestic => {
                "- HERO: Large section with headline mentioning location, tagline, and WhatsApp CTA button"
            }
            Market::Global => {
                "- HERO: Authority-style with outcome headline, problem/solution subheadline, and booking CTA"
            }
        }
    } else if has("service") {
        "- SERVICES: Grid of 3-6 service cards with icons/titles/descriptions"
    } else if has("about") || has("credibility") {
        "- ABOUT: Story section with business/personal background and trust elements"
    } else if has("testimonial") || has("social proof") {
        "- TESTIMONIALS: 2-3 customer review cards with star ratings"
    } else if has("contact") || has("location") {
        "- CONTACT: Address, phone, map embed placeholder, contact form"
    } else if has("hours") {
        "- HOURS: Business operating hours in a clear table/list format"
    } else if has("sticky mobile") {
        "- STICKY MOBILE FOOTER: Fixed bottom bar (mobile only) with Call and WhatsApp buttons"
    } else if has("booking") || has("cta") {
        "- BOOKING CTA: Prominent section with booking button linking to calendar"
    } else if has("footer") {
        "- FOOTER: Contact info, quick links, copyright, 'Powered by VocoWeb'"
    } else {
        return None;
    };
    Some(requirement)
}

/// Build the repair directive for `missing_sections`.
///
/// Sections with no matching rule are listed as missing but get no requirement line.
/// The directive always asks for the complete document, never a patch.
pub fn build_repair_instruction(missing_sections: &[String], market: Market) -> String {
    let sections_list = missing_sections
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");

    let requirements = missing_sections
        .iter()
        .filter_map(|s| section_requirement(s, market))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"
CRITICAL: The generated website is MISSING the following required sections:

{sections_list}

You MUST add these sections to the HTML. Here are the requirements:

{requirements}

Re-generate the complete HTML with ALL sections included.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_footer_only_repair_for_global() {
        let text = build_repair_instruction(&owned(&["footer"]), Market::Global);
        assert!(text.contains("- footer"));
        assert!(text.contains("Contact info"));
        assert!(text.contains("quick links"));
        assert!(text.contains("copyright"));
        assert!(!text.contains("HERO"));
        assert!(!text.contains("NAVBAR"));
        assert!(text.trim_end().ends_with("Re-generate the complete HTML with ALL sections included."));
    }

    #[test]
    fn test_hero_requirement_depends_on_market() {
        let domestic = section_requirement("hero section", Market::Domestic).unwrap();
        let global = section_requirement("authority hero section", Market::Global).unwrap();
        assert!(domestic.contains("location") && domestic.contains("WhatsApp"));
        assert!(global.contains("outcome headline") && global.contains("booking CTA"));
    }

    #[test]
    fn test_sticky_mobile_footer_is_not_the_plain_footer() {
        let req = section_requirement("sticky mobile footer", Market::Domestic).unwrap();
        assert!(req.starts_with("- STICKY MOBILE FOOTER"));
    }

    #[test]
    fn test_every_mandatory_section_has_a_requirement() {
        for market in [Market::Domestic, Market::Global] {
            for section in market.mandatory_sections() {
                assert!(
                    section_requirement(section, market).is_some(),
                    "no requirement for {section}"
                );
            }
        }
    }

    #[test]
    fn test_unmatched_sections_are_listed_without_requirement() {
        let text = build_repair_instruction(&owned(&["pricing table", "business hours"]), Market::Domestic);
        assert!(text.contains("- pricing table"));
        assert!(text.contains("- HOURS:"));
        assert_eq!(text.matches("\n- ").count(), 3);
    }

    #[test]
    fn test_empty_input_yields_empty_requirements() {
        let text = build_repair_instruction(&[], Market::Global);
        assert!(text.contains("MISSING"));
        assert!(!text.contains("\n- "));
    }
}
