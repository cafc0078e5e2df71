//! dmgbuild settings script template.

/// Handlebars template rendered into the `settings.py` passed to `dmgbuild -s`.
///
/// `dmgbuild` executes the file as Python with `defines` in scope; the
/// application path arrives through `-D app=<path>`. All interpolated strings
/// are pre-escaped for double-quoted Python literals.
pub const DMGBUILD_SETTINGS_TEMPLATE: &str = r#"# -*- coding: utf-8 -*-
# Generated by kodegen_bundler_dmg for "{{volume_name}}"

application = defines.get("app")

format = "{{format}}"
size = None

files = [
    application,
{{#each files}}
    ("{{source}}", "{{name}}"),
{{/each}}
]

symlinks = {
{{#each symlinks}}
    "{{name}}": "{{target}}",
{{/each}}
}

{{#if icon}}
icon = "{{icon}}"
{{/if}}

icon_locations = {
{{#each icon_locations}}
    "{{name}}": ({{x}}, {{y}}),
{{/each}}
}

{{#if background}}
background = "{{background}}"
{{else}}
background = None
{{/if}}

show_status_bar = False
show_tab_view = False
show_toolbar = False
show_pathbar = False
show_sidebar = False

window_rect = (({{window_x}}, {{window_y}}), ({{window_width}}, {{window_height}}))
default_view = "icon-view"
arrange_by = None
icon_size = {{icon_size}}
text_size = {{text_size}}
"#;
