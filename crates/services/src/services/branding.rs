//! Industry-specific branding guidelines appended to the generation system prompt

use strum_macros::{Display, EnumIter};

/// Branding category a business falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Industry {
    #[strum(to_string = "HEALTHCARE")]
    Healthcare,
    #[strum(to_string = "FOOD & HOSPITALITY")]
    FoodAndHospitality,
    #[strum(to_string = "TECH & SAAS")]
    TechAndSaas,
    #[strum(to_string = "LUXURY & WELLNESS")]
    LuxuryAndWellness,
    #[strum(to_string = "EDUCATION")]
    Education,
    #[strum(to_string = "PROFESSIONAL SERVICES")]
    ProfessionalServices,
    #[strum(to_string = "RETAIL & E-COMMERCE")]
    RetailAndEcommerce,
    #[strum(to_string = "FITNESS & SPORTS")]
    FitnessAndSports,
    #[strum(to_string = "DEFAULT")]
    Default,
}

/// Keyword → industry table. Scanned in order, first contained keyword wins.
const INDUSTRY_KEYWORDS: &[(&str, Industry)] = &[
    ("dental", Industry::Healthcare),
    ("medical", Industry::Healthcare),
    ("clinic", Industry::Healthcare),
    ("hospital", Industry::Healthcare),
    ("pharmacy", Industry::Healthcare),
    ("doctor", Industry::Healthcare),
    ("restaurant", Industry::FoodAndHospitality),
    ("cafe", Industry::FoodAndHospitality),
    ("bakery", Industry::FoodAndHospitality),
    ("catering", Industry::FoodAndHospitality),
    ("food", Industry::FoodAndHospitality),
    ("tech", Industry::TechAndSaas),
    ("software", Industry::TechAndSaas),
    ("saas", Industry::TechAndSaas),
    ("digital", Industry::TechAndSaas),
    ("agency", Industry::TechAndSaas),
    ("spa", Industry::LuxuryAndWellness),
    ("salon", Industry::LuxuryAndWellness),
    ("beauty", Industry::LuxuryAndWellness),
    ("boutique", Industry::LuxuryAndWellness),
    ("wellness", Industry::LuxuryAndWellness),
    ("tuition", Industry::Education),
    ("coaching", Industry::Education),
    ("school", Industry::Education),
    ("training", Industry::Education),
    ("education", Industry::Education),
    ("legal", Industry::ProfessionalServices),
    ("law", Industry::ProfessionalServices),
    ("accounting", Industry::ProfessionalServices),
    ("consulting", Industry::ProfessionalServices),
    ("shop", Industry::RetailAndEcommerce),
    ("store", Industry::RetailAndEcommerce),
    ("retail", Industry::RetailAndEcommerce),
    ("gym", Industry::FitnessAndSports),
    ("fitness", Industry::FitnessAndSports),
    ("yoga", Industry::FitnessAndSports),
    ("sports", Industry::FitnessAndSports),
];

impl Industry {
    /// Classify a free-text business type. Falls back to `Default`.
    pub fn from_business_type(business_type: &str) -> Self {
        let lower = business_type.to_lowercase();
        INDUSTRY_KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, industry)| *industry)
            .unwrap_or(Industry::Default)
    }

    pub fn guidelines(self) -> &'static str {
        match self {
            Industry::Healthcare => {
                r#"- Palette: clean whites with calming blues/teals; accent only for CTAs
- Typography: highly legible sans-serif body, generous line height
- Imagery: bright clinic interiors, smiling staff, no graphic medical imagery
- Tone: reassuring, professional, plain language; avoid fear-based copy
- Trust signals: qualifications, years of practice, hygiene/safety standards, patient reviews"#
            }
            Industry::FoodAndHospitality => {
                r#"- Palette: warm, appetising tones (terracotta, cream, deep greens)
- Typography: characterful serif headings with a friendly sans-serif body
- Imagery: large close-up food photography, ambience shots of the venue
- Tone: inviting, sensory, welcoming
- Trust signals: signature dishes, ratings from review platforms, hygiene ratings, opening hours"#
            }
            Industry::TechAndSaas => {
                r#"- Palette: dark or neutral base with one vibrant accent gradient
- Typography: geometric sans-serif, tight headings, mono for technical snippets
- Imagery: product screenshots, abstract shapes, team at work
- Tone: confident, precise, outcome-driven
- Trust signals: client logos, metrics, case studies, certifications"#
            }
            Industry::LuxuryAndWellness => {
                r#"- Palette: muted neutrals (sand, blush, sage) with gold or charcoal accents
- Typography: elegant high-contrast serif headings, light sans-serif body
- Imagery: soft-lit, spacious, calm; close-ups of treatments and textures
- Tone: serene, indulgent, personal
- Trust signals: trained specialists, premium products used, client transformations"#
            }
            Industry::Education => {
                r#"- Palette: friendly primaries softened with plenty of white space
- Typography: rounded, approachable sans-serif
- Imagery: students learning, classrooms, results boards
- Tone: encouraging, clear, parent-friendly
- Trust signals: results and toppers, teacher experience, batch sizes, parent testimonials"#
            }
            Industry::ProfessionalServices => {
                r#"- Palette: navy, charcoal and white with a restrained accent
- Typography: classic serif headings, crisp sans-serif body
- Imagery: professional portraits, office settings
- Tone: authoritative, discreet, precise
- Trust signals: credentials, memberships, years in practice, confidentiality commitment"#
            }
            Industry::RetailAndEcommerce => {
                r#"- Palette: brand-led with high-contrast CTA buttons
- Typography: bold display headings, compact sans-serif body
- Imagery: product grids on clean backgrounds, lifestyle shots
- Tone: energetic, benefit-focused
- Trust signals: customer reviews, return policy, delivery areas, secure payment badges"#
            }
            Industry::FitnessAndSports => {
                r#"- Palette: high-energy darks with neon or bold accent colors
- Typography: condensed heavy headings, strong uppercase labels
- Imagery: action shots, equipment, transformation photos
- Tone: motivating, direct, challenge-driven
- Trust signals: certified trainers, member transformations, class schedules, trial offers"#
            }
            Industry::Default => {
                r#"- Palette: build around the provided primary and accent colors on a light neutral base
- Typography: modern sans-serif body with a distinctive heading font
- Imagery: authentic photos of the business, team and work
- Tone: friendly, professional, customer-focused
- Trust signals: testimonials, years in business, clear contact information"#
            }
        }
    }
}

/// Branding excerpt for a business type, headed by its industry category
pub fn branding_for_business_type(business_type: &str) -> String {
    let industry = Industry::from_business_type(business_type);
    format!("{}\n{}", industry, industry.guidelines())
}
