//! Fixed marketing copy: services, authorities and FAQ entries.

pub struct Service {
    pub name: &'static str,
    pub summary: &'static str,
}

pub struct Authority {
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub scope: &'static str,
}

pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const SERVICES: &[Service] = &[
    Service {
        name: "Building Permits",
        summary: "New construction, modification and demolition permits from Dubai Municipality.",
    },
    Service {
        name: "Fit-Out Approvals",
        summary: "Interior fit-out approvals for offices, retail, restaurants and clinics.",
    },
    Service {
        name: "Civil Defence Approvals",
        summary: "Fire and life safety drawings and inspections with Dubai Civil Defence.",
    },
    Service {
        name: "DEWA Approvals",
        summary: "Load calculations, NOCs and connection approvals with DEWA.",
    },
    Service {
        name: "Food Establishment Approvals",
        summary: "Kitchen layout and food safety approvals for F&B outlets.",
    },
    Service {
        name: "Signage Permits",
        summary: "Shop front and advertising signage permits.",
    },
];

pub const AUTHORITIES: &[Authority] = &[
    Authority {
        name: "Dubai Municipality",
        abbreviation: "DM",
        scope: "Building permits, fit-out, food safety and public health approvals.",
    },
    Authority {
        name: "Dubai Civil Defence",
        abbreviation: "DCD",
        scope: "Fire and life safety systems, completion certificates.",
    },
    Authority {
        name: "Dubai Electricity and Water Authority",
        abbreviation: "DEWA",
        scope: "Electrical load, water connections and solar installations.",
    },
    Authority {
        name: "Dubai Development Authority",
        abbreviation: "DDA",
        scope: "Projects inside Dubai Design District, Dubai Internet City and other free zones.",
    },
    Authority {
        name: "Trakhees",
        abbreviation: "PCFC",
        scope: "Ports, Customs and Free Zone Corporation areas including JAFZA.",
    },
    Authority {
        name: "Roads and Transport Authority",
        abbreviation: "RTA",
        scope: "Road works, parking, access and signage NOCs.",
    },
    Authority {
        name: "Nakheel",
        abbreviation: "Nakheel",
        scope: "Community approvals for Palm Jumeirah, Jumeirah Islands and other Nakheel projects.",
    },
    Authority {
        name: "Emaar",
        abbreviation: "Emaar",
        scope: "Master developer NOCs for Downtown Dubai, Dubai Hills and Emaar communities.",
    },
    Authority {
        name: "Dubai South",
        abbreviation: "DWC",
        scope: "Approvals within Dubai South and the Aviation District.",
    },
    Authority {
        name: "Jebel Ali Free Zone",
        abbreviation: "JAFZA",
        scope: "Warehouse, office and industrial fit-out inside JAFZA.",
    },
];

pub const FAQS: &[Faq] = &[
    Faq {
        question: "How long does a fit-out approval take?",
        answer: "Most office fit-outs are approved within two to four weeks once drawings are complete. Restaurants and clinics take longer because more authorities are involved.",
    },
    Faq {
        question: "Which authority approves my project?",
        answer: "It depends on the location. Mainland projects go to Dubai Municipality, free zone projects go to the zone's own authority such as Trakhees or DDA, and master developers like Emaar or Nakheel issue their own NOCs first.",
    },
    Faq {
        question: "Do I need Civil Defence approval for a small office?",
        answer: "Yes. Any change to partitions, ceilings or fire systems needs a Civil Defence review, even for small units.",
    },
    Faq {
        question: "Can you handle approvals for a project already under construction?",
        answer: "Yes. We regularly take over projects mid-way, audit the existing submissions and close out outstanding comments.",
    },
    Faq {
        question: "What documents do I need to start?",
        answer: "A trade licence, the tenancy contract or title deed, and the landlord's NOC. We prepare the drawings and calculations.",
    },
];
