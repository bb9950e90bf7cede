use subject_tidy::domain::subject::Labels;
use subject_tidy::{Configuration, PrefixMode, normalize_subject};

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn mail_config(mode: PrefixMode) -> Configuration {
    Configuration {
        extract_tags: true,
        reinsert_tags: false,
        tag_list: list(&["EXT", "Extern"]),
        normalize_prefixes: true,
        prefix_mode: mode,
        reply_aliases: list(&["Re", "Aw", "Antw"]),
        forward_aliases: list(&["Fwd", "WG"]),
        labels: Labels::default(),
    }
}

const SUBJECTS: &[&str] = &[
    "",
    "Hello world",
    "[EXT] Hello",
    "Fwd: Re: Aw: Re: Hello",
    "[EXT] Re: Re: Quarterly report",
    "Re: [Extern] Fwd: WG: Re*2: Status",
    "  RE :  aw:Antw*4:  spaced  ",
    "Re:",
    "External matters",
    "Re: Fwd: Re: alternating",
    "EXT: Extern: [ext] tags only",
    "Fwd*2: Re*3: already collapsed",
    "[E[EXT]XT] Hello",
    "Re: [Ext[EXT]ern] Re: nested",
    "Re*99999999999: Re: huge",
];

fn all_configs() -> Vec<Configuration> {
    let mut out = Vec::new();
    for mode in [PrefixMode::Collapse, PrefixMode::Overwrite] {
        for reinsert in [false, true] {
            for extract in [false, true] {
                let mut cfg = mail_config(mode);
                cfg.reinsert_tags = reinsert;
                cfg.extract_tags = extract;
                out.push(cfg);
            }
        }
        let mut empty = Configuration::empty();
        empty.prefix_mode = mode;
        out.push(empty);
    }
    out
}

#[test]
fn normalization_is_idempotent() {
    for cfg in all_configs() {
        for subject in SUBJECTS {
            let once = normalize_subject(subject, &cfg);
            let twice = normalize_subject(&once, &cfg);
            assert_eq!(twice, once, "subject {subject:?} under {cfg:?}");
        }
    }
}

#[test]
fn tag_removal_ignores_list_order() {
    let mut cfg = mail_config(PrefixMode::Collapse);
    assert_eq!(normalize_subject("[EXT] Hello", &cfg), "Hello");
    cfg.tag_list = list(&["Extern", "EXT"]);
    assert_eq!(normalize_subject("[EXT] Hello", &cfg), "Hello");
}

#[test]
fn collapse_mode_counts_replies() {
    assert_eq!(
        normalize_subject("Fwd: Re: Aw: Re: Hello", &mail_config(PrefixMode::Collapse)),
        "Fwd: Re*3: Hello"
    );
}

#[test]
fn overwrite_mode_keeps_first_marker() {
    assert_eq!(
        normalize_subject("Fwd: Re: Aw: Re: Hello", &mail_config(PrefixMode::Overwrite)),
        "Fwd: Hello"
    );
}

#[test]
fn subjects_without_prefixes_pass_through() {
    for cfg in all_configs() {
        assert_eq!(normalize_subject("Hello world", &cfg), "Hello world");
    }
}

#[test]
fn tag_and_prefix_combined() {
    assert_eq!(
        normalize_subject(
            "[EXT] Re: Re: Quarterly report",
            &mail_config(PrefixMode::Collapse)
        ),
        "Re*2: Quarterly report"
    );
}

#[test]
fn tags_respect_word_boundaries() {
    let mut cfg = mail_config(PrefixMode::Collapse);
    cfg.tag_list = list(&["EXT"]);
    assert_eq!(normalize_subject("External matters", &cfg), "External matters");
}

#[test]
fn empty_configuration_changes_nothing() {
    for mode in [PrefixMode::Collapse, PrefixMode::Overwrite] {
        let mut cfg = Configuration::empty();
        cfg.prefix_mode = mode;
        for subject in SUBJECTS.iter().filter(|s| s.trim() == **s) {
            assert_eq!(normalize_subject(subject, &cfg), *subject);
        }
    }
}
