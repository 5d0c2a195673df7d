pub const WORDLE_WORDS: &[&str] = &[
    "APPLE", "BEACH", "CHAIR", "DRIVE", "EMPTY", "FLAME", "GRAPE", "HOUSE", "IMAGE", "JUICE",
    "KNIFE", "LEMON", "MONEY", "NIGHT", "OCEAN", "PIANO", "QUEEN", "RADIO", "SHELF", "TABLE",
    "UNCLE", "VOICE", "WATER", "YOUTH", "ZEBRA",
];
