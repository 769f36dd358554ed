use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    tmp: TempDir,
    pub home: PathBuf,
    pub catalog: PathBuf,
    pub annotations: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let catalog = write_fixture_catalog(tmp.path());
        let annotations = write_fixture_annotations(tmp.path());

        Self {
            tmp,
            home,
            catalog,
            annotations,
        }
    }

    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("waymark");
        cmd.env("HOME", &self.home)
            .arg("--catalog")
            .arg(&self.catalog);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn catalog_value(&self) -> Value {
        let raw = fs::read_to_string(&self.catalog).expect("read catalog file");
        serde_json::from_str(&raw).expect("catalog is valid json")
    }
}

pub fn write_fixture_catalog(base: &Path) -> PathBuf {
    let catalog = json!({
        "Clearfell": {
            "act": 1,
            "suggested_route": ["waypoint", "beira", "grelwood exit"]
        },
        "The Red Vale": {
            "act": 1,
            "suggested_route": ["three obelisks", "rust king"],
            "notes": "Shatter all three obelisks before leaving."
        }
    });
    let path = base.join("zones.json");
    fs::write(
        &path,
        serde_json::to_string_pretty(&catalog).expect("serialize catalog"),
    )
    .expect("write catalog fixture");
    path
}

pub fn write_fixture_annotations(base: &Path) -> PathBuf {
    let annotations = json!({
        "Clearfell": {
            "notes": "Beira is always north/northeast of waypoint. Mud Burrow and the worm boss can be skipped.",
            "pois": {
                "Boss: Beira of the Rotten Pack": {"optional": false, "location_hint": "Always north/northeast of waypoint"},
                "Mysterious Campsite (Abandoned Stash)": {"optional": true, "location_hint": "Spawns to left or right of starting zone"},
                "Mud Burrow Entrance / Waypoint": {"optional": true, "location_hint": "Can be skipped - worm boss is not required"}
            },
            "walkthrough_steps": [
                {"order": 1, "action": "Kill Beira of the Rotten Pack", "optional": false, "tip": "Boss is always north/northeast of waypoint"},
                {"order": 2, "action": "Find exit to Grelwood", "optional": false, "tip": "Use checkpoint from Beira to return if you find exit first"},
                {"order": "opt", "action": "Find the Mysterious Campsite", "optional": true, "tip": "Uncut support gem reward"}
            ]
        },
        "The Grelwood": {
            "notes": "Find waypoint first (somewhat in center). Enter zones to take their waypoints, then backtrack to Grelwood.",
            "pois": {
                "Boss: The Brambleghast": {"optional": true, "location_hint": "Usually in same quadrant as Red Vale entrance"},
                "Tree of Souls + Waypoint": {"optional": false, "location_hint": "Somewhat in center of zone"}
            },
            "walkthrough_steps": [
                {"order": 1, "action": "Find waypoint and talk to quest NPC", "optional": false, "tip": "Waypoint is somewhat in center of zone"},
                {"order": 2, "action": "Find exit to Grim Tangle", "optional": false, "tip": "Enter zone, take waypoint, backtrack to Grelwood"},
                {"order": 2, "action": "Find exit to Red Vale", "optional": false, "tip": "Enter zone, take waypoint, backtrack to Grelwood"},
                {"order": 3, "action": "Go to Red Vale", "optional": false, "tip": "Via waypoint or checkpoint"},
                {"order": "opt", "action": "Find and kill Brambleghast", "optional": true, "tip": "Level 1 uncut skill gem reward"}
            ],
            "town_visits": [
                {"after_zone": "The Red Vale", "instructions": "Go back to town, get runic tools from Renly", "order": 1},
                {"after_zone": "The Red Vale", "instructions": "Go to Grelwood waypoint, click the three runes, talk to Una", "order": 2},
                {"after_zone": "The Red Vale", "instructions": "Go back to town, talk to Una", "order": 3}
            ]
        }
    });
    let path = base.join("act1.json");
    fs::write(
        &path,
        serde_json::to_string_pretty(&annotations).expect("serialize annotations"),
    )
    .expect("write annotation fixture");
    path
}
