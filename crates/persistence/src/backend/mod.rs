// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection setup. Everything else goes through the Diesel DSL in
//! `queries/` and `mutations/`.

pub mod sqlite;
