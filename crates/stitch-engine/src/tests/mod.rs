//! Crate-level unit and BDD tests.

mod unit;

/// Component used across engine tests. Elements start at 7:4 (section),
/// 8:6 (h2), 9:6 (p), 10:6 (ul), 10:29 (li) and 11:6 (button).
const CARD: &str = concat!(
    "import { useState } from \"react\";\n",
    "\n",
    "const TABS = [\"Overview\", \"Settings\"];\n",
    "\n",
    "export default function Card() {\n",
    "  return (\n",
    "    <section className=\"card p-4 text-sm\" data-stitch-id=\"card\">\n",
    "      <h2 className=\"title\">Account</h2>\n",
    "      <p>Save Changes</p>\n",
    "      <ul>{TABS.map((tab) => <li key={tab}>{tab}</li>)}</ul>\n",
    "      <button type=\"button\">Submit</button>\n",
    "    </section>\n",
    "  );\n",
    "}\n",
);
