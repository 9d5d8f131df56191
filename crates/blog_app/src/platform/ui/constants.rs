pub const PROMPT: &str = "> ";
pub const RULE: &str = "----------------------------------------";

pub const HELP_LINES: &[&str] = &[
    "Commands:",
    "  title <text>          set the blog title (location)",
    "  add                   append a section",
    "  section <n> <text>    set the title of section n",
    "  model <n> <id>        set the model of section n",
    "  gen <n>               (re)generate section n",
    "  gen all               generate every section",
    "  images                fetch images for the title",
    "  download              render and open the document",
    "  show                  print the current blog",
    "  help                  print this help",
    "  quit                  exit",
];
