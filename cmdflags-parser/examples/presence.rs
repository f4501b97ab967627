use cmdflags_parser::{FlagDef, ParsedFlags, Tokens};

fn main() {
    let argv = &["-fg", "--verbose", "hello", "--bar"];

    let flags = &[
        FlagDef::new("force", 'f'),
        FlagDef::new("global", 'g'),
        FlagDef::new("verbose", 'v'),
    ];

    let tokens = Tokens::new(argv);
    let parsed: ParsedFlags<'_, 4> = ParsedFlags::parse(tokens, flags);

    for flag in flags {
        println!("--{} -> {}", flag.long(), parsed.was_passed_flag(flag));
    }

    if parsed.has_unknown_flags() {
        println!("unknown flags: {}", parsed.format_unknown_flags());
    }
}
