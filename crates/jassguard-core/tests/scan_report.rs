use std::fmt::Write;

use expect_test::expect;
use jassguard_core::{scan, RuleCatalog, ScanReport, ScriptSearch};

const CHAT_HOOK: &str = "globals
    trigger gg_trg_Activator = null
endglobals
function Trig_Chat takes nothing returns nothing
    call TriggerRegisterPlayerChatEvent( t, Player(0), \"-kill\", true )
    call BJDebugMsg( GetPlayerName( Player(0) ) )
endfunction
";

fn render(report: &ScanReport) -> String {
    let mut out = String::new();
    for w in report.warnings() {
        writeln!(out, "{w}").unwrap();
    }
    writeln!(out, "--").unwrap();
    for line in report.suspicious_lines() {
        writeln!(out, "| {line}").unwrap();
    }
    out
}

#[test]
fn builtin_catalog_report() {
    let search = ScriptSearch::new(CHAT_HOOK).unwrap();
    let report = scan(&search, RuleCatalog::builtin()).unwrap();

    let expected = expect![[r#"
        7: Map references an Activator
        7: Map contains very common cheat commands words.
        4: Map contains GetPlayerName.
        2: Map uses TriggerRegisterPlayerChatEvent.
        --
        | triggergg_trg_Activator=null
        |     call TriggerRegisterPlayerChatEvent( t, Player(0), "-kill", true )
        | callBJDebugMsg(GetPlayerName(Player(0)))
        | callTriggerRegisterPlayerChatEvent(t,Player(0),"-kill",true)
    "#]];
    expected.assert_eq(&render(&report));
    assert_eq!(report.max_severity().map(|s| s.get()), Some(7));
}

#[test]
fn spacing_does_not_hide_signatures() {
    let spaced = "globals\r\nendglobals\r\ncall Force Add Player ( p )\r\n\r\n\r\ncall  String\tHash(\"x\")";
    let search = ScriptSearch::new(spaced).unwrap();
    let report = scan(&search, RuleCatalog::builtin()).unwrap();

    let expected = expect![[r#"
        8: Map contains StringHash.
        4: Map contains ForceAddPlayer.
        --
        | callStringHash("x")
        | callForceAddPlayer(p)
    "#]];
    expected.assert_eq(&render(&report));
}

#[test]
fn custom_catalog_from_toml() {
    let catalog = RuleCatalog::from_toml_str(
        r#"
        [[rules]]
        description = "Uses a backdoor."
        severity = 9
        needles = ["Back Door"]

        [[rules]]
        description = "Chat command."
        severity = 3
        mode = "exact"
        needles = ["-gold", "-lumber"]
        "#,
    )
    .unwrap();

    let search = ScriptSearch::new("call BackDoor()\n// -gold and -lumber\n").unwrap();
    let report = scan(&search, &catalog).unwrap();

    let expected = expect![[r#"
        9: Uses a backdoor.
        3: Chat command.
        --
        | callBackDoor()
        | // -gold and -lumber
    "#]];
    expected.assert_eq(&render(&report));
    assert_eq!(report.findings()[1].lines.len(), 2);
}
