use anyhow::{anyhow, bail, Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::{FillArgs, OptionArgs, PageArgs};
use crate::clip::SystemClipboard;
use crate::exec;
use crate::page;

use branch_namer::bootstrap::{mount_with, ENABLE_ATTR};
use branch_namer::config::{OptionsLayer, ValidateOn};
use branch_namer::dom::NodePath;
use branch_namer::events::{TriggerKind, WidgetEvent};
use branch_namer::form;
use branch_namer::BranchNameWidget;

const DEFAULT_SUCCESS_MSG: &str = "Copied!";

pub(crate) fn cmd_render(args: PageArgs) -> Result<()> {
    for widget in prepare(&args)? {
        print_branch(&widget);
    }
    Ok(())
}

pub(crate) fn cmd_copy(args: PageArgs) -> Result<()> {
    let mut widgets = prepare(&args)?;
    let widget = widgets
        .first_mut()
        .ok_or_else(|| anyhow!("No generator to copy from"))?;
    print_branch(widget);
    copy_and_report(widget);
    Ok(())
}

pub(crate) fn cmd_check(args: PageArgs) -> Result<()> {
    let widgets = prepare(&args)?;
    let mut incomplete = 0;
    for widget in &widgets {
        let valid = widget.check_form_validity();
        if !valid {
            incomplete += 1;
        }
        print_branch(widget);
        println!("Valid:    {}", if valid { "yes" } else { "no" });
    }
    if incomplete > 0 {
        bail!("Form incomplete: {incomplete} generator(s) have empty fields");
    }
    Ok(())
}

pub(crate) fn cmd_fill(args: FillArgs) -> Result<()> {
    if !exec::can_prompt() {
        bail!("`bng fill` requires a TTY");
    }
    let mut widgets = prepare(&args.page)?;
    let widget = widgets
        .first_mut()
        .ok_or_else(|| anyhow!("No generator to fill"))?;
    let theme = ColorfulTheme::default();

    for path in widget.inputs().to_vec() {
        let Some(el) = widget.control(&path).cloned() else {
            continue;
        };
        if el.disabled {
            continue;
        }
        let label = el
            .name()
            .or_else(|| el.attr("placeholder"))
            .unwrap_or(el.tag.as_str())
            .to_string();

        let answer = if el.is("select") {
            let choices: Vec<(String, String)> = form::options(&el)
                .map(|o| {
                    let value = form::option_value(o);
                    let shown = o.text.clone().unwrap_or_else(|| value.clone());
                    (value, shown)
                })
                .collect();
            if choices.is_empty() {
                continue;
            }
            let current = form::control_value(&el);
            let labels: Vec<&str> = choices.iter().map(|(_, l)| l.as_str()).collect();
            let picked = Select::with_theme(&theme)
                .with_prompt(&label)
                .items(&labels)
                .default(choices.iter().position(|(v, _)| *v == current).unwrap_or(0))
                .interact()
                .context("Prompt failed")?;
            choices[picked].0.clone()
        } else if el.is("input") {
            match el.input_type().as_str() {
                "checkbox" | "radio" => {
                    let on = Confirm::with_theme(&theme)
                        .with_prompt(&label)
                        .default(el.checked)
                        .interact()
                        .context("Prompt failed")?;
                    if widget.set_checked(&path, on) {
                        simulate_edit(widget, &path);
                    }
                    print_branch(widget);
                    continue;
                }
                "hidden" | "submit" | "button" | "image" | "reset" | "file" => continue,
                _ => prompt_text(&theme, &label, &form::control_value(&el))?,
            }
        } else {
            prompt_text(&theme, &label, &form::control_value(&el))?
        };

        if widget.set_value(&path, &answer) {
            simulate_edit(widget, &path);
        }
        print_branch(widget);
    }

    if !widget.check_form_validity() {
        eprintln!("Warning: some fields are still empty");
    }

    let copy = args.copy
        || Confirm::with_theme(&theme)
            .with_prompt("Copy branch name to clipboard?")
            .default(true)
            .interact()
            .context("Prompt failed")?;
    if copy {
        copy_and_report(widget);
    }
    Ok(())
}

pub(crate) fn cmd_page() -> Result<()> {
    print!("{}", page::sample_page_text()?);
    Ok(())
}

fn prompt_text(theme: &ColorfulTheme, label: &str, current: &str) -> Result<String> {
    Input::<String>::with_theme(theme)
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .context("Prompt failed")
}

fn explicit_options(args: &OptionArgs) -> Result<OptionsLayer> {
    let file = match &args.options_file {
        Some(p) => OptionsLayer::load(p)?,
        None => OptionsLayer::default(),
    };
    let flags = OptionsLayer {
        validate_on: args.validate_on.as_deref().map(ValidateOn::parse),
        live_validate: args.live_validate,
        validate_on_blur: args.validate_on_blur,
    };
    Ok(file.overlay(&flags))
}

fn prepare(args: &PageArgs) -> Result<Vec<BranchNameWidget>> {
    let page = page::load_page(args.page.as_deref())?;
    let explicit = explicit_options(&args.opts)?;

    let mut widgets = mount_with(page, &explicit);
    if widgets.is_empty() {
        bail!("No generator found on page (expected an element with {ENABLE_ATTR})");
    }
    if let Some(date) = args.date {
        widgets = widgets.into_iter().map(|w| w.with_date(date)).collect();
    }

    for (name, value) in &args.set {
        let mut applied = false;
        for widget in widgets.iter_mut() {
            for path in widget.controls_named(name) {
                if widget.set_value(&path, value) {
                    applied = true;
                    simulate_edit(widget, &path);
                }
            }
        }
        if !applied {
            bail!("No control named {name:?} accepts {value:?}");
        }
    }
    Ok(widgets)
}

/// Events a user editing a field produces: typing, committing, leaving it.
fn simulate_edit(widget: &mut BranchNameWidget, path: &NodePath) {
    for kind in [TriggerKind::Input, TriggerKind::Change, TriggerKind::Blur] {
        widget.handle(&WidgetEvent::Field {
            kind,
            target: path.clone(),
        });
    }
}

fn print_branch(widget: &BranchNameWidget) {
    match widget.output_text() {
        Some(text) => println!("Branch:   {text}"),
        None => println!("Branch:   (no output area)"),
    }
}

fn copy_and_report(widget: &mut BranchNameWidget) {
    widget.select_output();
    if widget.copy(&mut SystemClipboard) {
        println!("{}", widget.success_message().unwrap_or(DEFAULT_SUCCESS_MSG));
        widget.handle(&WidgetEvent::FadeComplete);
    } else {
        eprintln!("Warning: branch name was not copied to the clipboard");
    }
}
