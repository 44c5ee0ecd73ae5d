//! The token catalogue (§4.1): one named regex per TAC element, compiled
//! once per process into a process-wide table, mirroring the teacher
//! crate's practice of building its parser once at compile time rather than
//! per call.

use std::sync::OnceLock;

use regex::Regex;

macro_rules! token_table {
    ($($field:ident: $pat:expr),+ $(,)?) => {
        /// All token patterns used by the grammar driver, compiled once.
        pub struct TokenPatterns {
            $(pub $field: Regex,)+
        }

        impl TokenPatterns {
            fn build() -> Self {
                Self {
                    $($field: Regex::new(concat!("^(?:", $pat, ")$")).expect("static token regex"),)+
                }
            }
        }
    };
}

token_table! {
    // -- mandatory body --------------------------------------------------
    ty: r"METAR|SPECI",
    ident: r"[A-Z][A-Z0-9]{3}",
    itime: r"\d{6}Z",
    autocor: r"AUTO|COR",
    wind: r"(?:\d{3}|VRB)P?\d{2,3}(?:G\d{2,3})?KT",
    wind_vrb: r"\d{3}V\d{3}",
    vsby: r"CAVOK|M?\d{1,2}(?: \d/\d)?SM|M?\d/\d{1,2}SM|\d{4}",
    rvr: r"R\d{2}[LCR]?/[MP]?\d{4}(?:V[MP]?\d{4})?(?:FT)?[UDN]?",
    funnel: r"[+-]?(?:FC|\+FC)",
    pcp: r"[+-]?(?:VC)?(?:SH|TS|FZ|MI|BC|PR|DR|BL)?(?:DZ|RA|SN|SG|IC|PL|GR|GS|UP){1,3}",
    obv: r"(?:VC)?(?:BR|FG|FU|VA|DU|SA|HZ|PY)",
    vcnty: r"VC(?:SH|TS|FG|PO|DS|SS|FC)",
    sky: r"(?:FEW|SCT|BKN|OVC|0VC|VV|///)(?:\d{3}|///)(?:CB|TCU|///)?|CLR|SKC|NSC|NCD",
    temp: r"M?\d{2}/M?\d{2}|M?\d{2}/",
    alt: r"[AQ]\d{4}",

    // -- remarks -----------------------------------------------------------
    ostype: r"AO[12]",
    pkwnd: r"PK\s?WND\s?\d{3}\d{2,3}/\d{2,4}",
    wshft: r"WSHFT\s?\d{2,4}(?:\s?FROPA)?",
    sfcvis: r"SFC\s?VIS\s?M?\d(?:\s\d/\d)?",
    twrvis: r"TWR\s?VIS\s?M?\d(?:\s\d/\d)?",
    vvis: r"VIS\s?\d(?:\s\d/\d)?V\d(?:\s\d/\d)?",
    sctrvis: r"VIS\s?[NSEW]{1,2}\s?\d(?:\s\d/\d)?",
    vis2loc: r"VIS\s?\d(?:\s\d/\d)?\s[A-Z0-9]+",
    ltg: r"(?:OCNL|FRQ|CONS)?\s?LTG(?:CG|IC|CC|CA)*",
    tstmvmt: r"TS\s?MOV\s?[NSEW]{1,2}",
    pcpnhist: r"(?:SH|FZ)?(?:TS|RA|SN|DZ|PL|GR|GS|IC|UP)(?:[BE]\d{2,4})+",
    hail: r"GR\s?\d+(?:\s?\d/\d)?",
    vcig: r"\d{3}V\d{3}",
    obsc: r"[A-Z]{2}\d\s?(?:FEW|SCT|BKN|OVC)\d{3}",
    vsky: r"(?:FEW|SCT|BKN|OVC)\d{3}\sV\s(?:FEW|SCT|BKN|OVC)",
    cig2loc: r"CIG\s?\d{3}\s[A-Z0-9]+",
    pchgr: r"PRESRR|PRESFR",
    mslp: r"SLP\d{3}",
    nospeci: r"NOSPECI",
    aurbo: r"AURBO",
    contrails: r"CONTRAILS?",
    snoincr: r"SNINCR\s?\d{1,2}/\d{1,3}",
    runway: r"RWY\d{2}[LCR]?",
    other: r"FIRST|LAST",
    pcp1h: r"P\d{4}",
    pcp6h: r"6\d{4}",
    pcp24h: r"7\d{4}",
    iceacc: r"I[136]\d{3}",
    snodpth: r"4/\d{3}",
    lwe: r"933\d{3}",
    sunshine: r"98\d{3}",
    tempdec: r"T[01]\d{3}[01]\d{3}",
    maxt6h: r"1[01]\d{3}",
    mint6h: r"2[01]\d{3}",
    xtrmet: r"4[01]\d{3}[01]\d{3}",
    ptndcy3h: r"5[0-8]\d{3}",
    ssindc: r"RVRNO|PWINO|PNO|FZRANO|TSNO|VISNO|CHINO|SLPNO|WINDNO",
    estwind: r"WIND\s?ESTMD",
    maintenance: r"\$",
    no_rmk: r"(?!RMK\b)\S+",
}

static PATTERNS: OnceLock<TokenPatterns> = OnceLock::new();

/// The process-wide compiled token table (§5: "initialized once per process").
pub fn patterns() -> &'static TokenPatterns {
    PATTERNS.get_or_init(TokenPatterns::build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wind_matches_gust_form() {
        assert!(patterns().wind.is_match("27015G25KT"));
    }

    #[test]
    fn ident_rejects_lowercase() {
        assert!(!patterns().ident.is_match("kden"));
    }

    #[test]
    fn no_rmk_rejects_the_literal_rmk_token() {
        assert!(!patterns().no_rmk.is_match("RMK"));
        assert!(patterns().no_rmk.is_match("X$X"));
    }
}
